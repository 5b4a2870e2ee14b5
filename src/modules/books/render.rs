//! Markdown to HTML rendering pipeline.

use maud::Render;
use pulldown_cmark::{html, Options, Parser};
use serde::Serialize;

/// Rendered HTML, ready to embed in a page without further escaping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Fragment(String);

impl Fragment {
    /// Wrap already-rendered HTML
    pub fn from_html(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Render for Fragment {
    fn render_to(&self, buffer: &mut String) {
        buffer.push_str(&self.0);
    }
}

/// Turns marked-up text into a displayable fragment.
pub trait Renderer: Send + Sync {
    fn render(&self, markup: &str) -> Fragment;
}

/// CommonMark renderer with tables, footnotes and strikethrough enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    fn options() -> Options {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_SMART_PUNCTUATION);
        options
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, markup: &str) -> Fragment {
        let parser = Parser::new_ext(markup, Self::options());
        let mut out = String::with_capacity(markup.len() + markup.len() / 2);
        html::push_html(&mut out, parser);
        Fragment(out)
    }
}
