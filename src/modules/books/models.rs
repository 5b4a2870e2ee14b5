use serde::Serialize;

use super::render::Fragment;

/// A reviewed book as shown in the list view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// URL-friendly identifier, unique within the store
    pub slug: String,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Read date as written in the content source
    pub date: String,
    /// Rating out of 10
    pub rating: f32,
    /// Cover image URL
    pub cover_image: String,
    /// Rendered short review
    pub summary: Fragment,
}

/// Descriptive fields shared by a book and its long-form review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookMetadata {
    pub title: String,
    pub author: String,
    pub date: String,
    pub rating: f32,
}

/// Full review of one book.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookContent {
    pub slug: String,
    pub metadata: BookMetadata,
    /// Rendered review body
    pub source: Fragment,
}
