//! Parsing of book review documents: a YAML front-matter block delimited by
//! `---` lines, followed by the markdown review body.

use serde::Deserialize;
use thiserror::Error;

use super::models::{Book, BookContent, BookMetadata};
use super::render::Renderer;
use crate::utils::{is_slug, slugify};

const DELIMITER: &str = "---";
const MAX_RATING: f32 = 10.0;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document does not start with a `---` front-matter block")]
    MissingFrontMatter,

    #[error("invalid front matter")]
    FrontMatter(#[from] serde_yaml::Error),

    #[error("field `{0}` must not be empty")]
    EmptyField(&'static str),

    #[error("rating {0} is outside 0..=10")]
    RatingOutOfRange(f32),

    #[error("slug `{0}` is not lowercase words joined by `-`")]
    InvalidSlug(String),

    #[error("cannot derive a slug from title {0:?}")]
    EmptySlug(String),
}

/// Front-matter fields of a book review.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontMatter {
    pub title: String,
    pub author: String,
    pub date: String,
    pub rating: f32,
    pub cover_image: String,
    /// Short review in markdown; the body's first paragraph when absent
    #[serde(default)]
    pub summary: Option<String>,
    /// Explicit identifier; derived from the title when absent
    #[serde(default)]
    pub slug: Option<String>,
}

/// A validated, not yet rendered, book review.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub slug: String,
    pub front: FrontMatter,
    pub body: String,
}

impl Document {
    pub fn parse(raw: &str) -> Result<Self, DocumentError> {
        let (front, body) = split_front_matter(raw).ok_or(DocumentError::MissingFrontMatter)?;
        let mut front: FrontMatter = serde_yaml::from_str(front)?;

        for (name, value) in [
            ("title", &front.title),
            ("author", &front.author),
            ("date", &front.date),
            ("coverImage", &front.cover_image),
        ] {
            if value.trim().is_empty() {
                return Err(DocumentError::EmptyField(name));
            }
        }

        if !front.rating.is_finite() || !(0.0..=MAX_RATING).contains(&front.rating) {
            return Err(DocumentError::RatingOutOfRange(front.rating));
        }
        // `-0` reads as a valid rating; store it as `0`
        if front.rating == 0.0 {
            front.rating = 0.0;
        }

        let slug = match &front.slug {
            Some(explicit) if is_slug(explicit) => explicit.clone(),
            Some(explicit) => return Err(DocumentError::InvalidSlug(explicit.clone())),
            None => {
                let derived = slugify(&front.title);
                if derived.is_empty() {
                    return Err(DocumentError::EmptySlug(front.title.clone()));
                }
                derived
            }
        };

        Ok(Self {
            slug,
            front,
            body: body.to_string(),
        })
    }

    /// Summary-level record with the short review rendered.
    pub fn to_book(&self, renderer: &dyn Renderer) -> Book {
        let summary = match &self.front.summary {
            Some(summary) => renderer.render(summary),
            None => renderer.render(first_paragraph(&self.body)),
        };

        Book {
            slug: self.slug.clone(),
            title: self.front.title.clone(),
            author: self.front.author.clone(),
            date: self.front.date.clone(),
            rating: self.front.rating,
            cover_image: self.front.cover_image.clone(),
            summary,
        }
    }

    /// Full review with the body rendered.
    pub fn to_content(&self, renderer: &dyn Renderer) -> BookContent {
        BookContent {
            slug: self.slug.clone(),
            metadata: BookMetadata {
                title: self.front.title.clone(),
                author: self.front.author.clone(),
                date: self.front.date.clone(),
                rating: self.front.rating,
            },
            source: renderer.render(&self.body),
        }
    }
}

/// Split `raw` into its front-matter text and the body that follows it.
fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = raw.split_inclusive('\n');

    let opening = lines.next()?;
    if opening.trim_end() != DELIMITER {
        return None;
    }

    let mut offset = opening.len();
    for line in lines {
        if line.trim_end() == DELIMITER {
            let front = &raw[opening.len()..offset];
            let body = &raw[offset + line.len()..];
            return Some((front, body));
        }
        offset += line.len();
    }

    None
}

/// First prose block of a markdown body, skipping headings.
fn first_paragraph(body: &str) -> &str {
    body.split("\n\n")
        .flat_map(|block| block.split("\r\n\r\n"))
        .map(str::trim)
        .find(|block| !block.is_empty() && !block.starts_with('#'))
        .unwrap_or("")
}
