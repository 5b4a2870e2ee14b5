//! Read-only content store for book reviews, keyed by slug.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use super::document::{Document, DocumentError};
use super::models::{Book, BookContent};
use super::render::Renderer;

const DOCUMENT_EXTENSION: &str = "md";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid book document `{name}`")]
    Document {
        name: String,
        #[source]
        source: DocumentError,
    },

    #[error("`{first}` and `{second}` both review `{title}`")]
    DuplicateTitle {
        title: String,
        first: String,
        second: String,
    },

    #[error("`{first}` and `{second}` both resolve to slug `{slug}`")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },
}

/// Source of book records and their long-form reviews.
///
/// Absence of a slug is a normal outcome (`Ok(None)`); errors mean the
/// backing content itself is broken or unreachable.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// All known books, in no particular order
    async fn list_books(&self) -> Result<Vec<Book>, StoreError>;

    /// The full review for `slug`, if any book has that slug
    async fn get_book(&self, slug: &str) -> Result<Option<BookContent>, StoreError>;
}

/// A raw document together with the name it is reported under.
struct Named {
    name: String,
    raw: String,
}

/// Parse every document and enforce title and slug uniqueness.
fn parse_all(named: &[Named]) -> Result<Vec<Document>, StoreError> {
    let mut titles: HashMap<String, &str> = HashMap::with_capacity(named.len());
    let mut seen: HashMap<String, &str> = HashMap::with_capacity(named.len());
    let mut documents = Vec::with_capacity(named.len());

    for Named { name, raw } in named {
        let document = Document::parse(raw).map_err(|source| StoreError::Document {
            name: name.clone(),
            source,
        })?;

        if let Some(first) = titles.insert(document.front.title.clone(), name) {
            return Err(StoreError::DuplicateTitle {
                title: document.front.title,
                first: first.to_string(),
                second: name.clone(),
            });
        }

        if let Some(first) = seen.insert(document.slug.clone(), name) {
            return Err(StoreError::DuplicateSlug {
                slug: document.slug,
                first: first.to_string(),
                second: name.clone(),
            });
        }

        documents.push(document);
    }

    Ok(documents)
}

fn find_content(
    documents: &[Document],
    slug: &str,
    renderer: &dyn Renderer,
) -> Option<BookContent> {
    documents
        .iter()
        .find(|document| document.slug == slug)
        .map(|document| document.to_content(renderer))
}

/// Store backed by a directory of `*.md` review files.
///
/// The directory is re-read on every call; content is small and edits show
/// up without a restart.
pub struct FsContentStore {
    root: PathBuf,
    renderer: Arc<dyn Renderer>,
}

impl FsContentStore {
    pub fn new(root: impl Into<PathBuf>, renderer: Arc<dyn Renderer>) -> Self {
        Self {
            root: root.into(),
            renderer,
        }
    }

    async fn read_documents(&self) -> Result<Vec<Document>, StoreError> {
        let io_error = |path: &Path| {
            let path = path.to_path_buf();
            move |source| StoreError::Io { path, source }
        };

        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(io_error(&self.root))?;

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io_error(&self.root))? {
            let path = entry.path();
            let hidden = entry.file_name().to_string_lossy().starts_with('.');
            let is_document = path
                .extension()
                .is_some_and(|extension| extension == DOCUMENT_EXTENSION);
            if hidden || !is_document {
                continue;
            }
            let file_type = entry.file_type().await.map_err(io_error(&path))?;
            if file_type.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut named = Vec::with_capacity(paths.len());
        for path in paths {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .map_err(io_error(&path))?;
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            named.push(Named { name, raw });
        }

        let documents = parse_all(&named)?;
        tracing::debug!(
            root = %self.root.display(),
            count = documents.len(),
            "book documents loaded"
        );
        Ok(documents)
    }
}

#[async_trait]
impl ContentStore for FsContentStore {
    async fn list_books(&self) -> Result<Vec<Book>, StoreError> {
        let documents = self.read_documents().await?;
        Ok(documents
            .iter()
            .map(|document| document.to_book(self.renderer.as_ref()))
            .collect())
    }

    async fn get_book(&self, slug: &str) -> Result<Option<BookContent>, StoreError> {
        let documents = self.read_documents().await?;
        Ok(find_content(&documents, slug, self.renderer.as_ref()))
    }
}

/// Store over raw documents held in memory, listed in insertion order.
pub struct MemoryContentStore {
    documents: Vec<Named>,
    renderer: Arc<dyn Renderer>,
}

impl MemoryContentStore {
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self {
            documents: Vec::new(),
            renderer,
        }
    }

    /// Add a raw review document under a display name
    pub fn with_document(mut self, name: impl Into<String>, raw: impl Into<String>) -> Self {
        self.documents.push(Named {
            name: name.into(),
            raw: raw.into(),
        });
        self
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn list_books(&self) -> Result<Vec<Book>, StoreError> {
        let documents = parse_all(&self.documents)?;
        Ok(documents
            .iter()
            .map(|document| document.to_book(self.renderer.as_ref()))
            .collect())
    }

    async fn get_book(&self, slug: &str) -> Result<Option<BookContent>, StoreError> {
        let documents = parse_all(&self.documents)?;
        Ok(find_content(&documents, slug, self.renderer.as_ref()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::modules::books::render::MarkdownRenderer;

    /// Review document with the given title and rating.
    pub(crate) fn review(title: &str, rating: f32) -> String {
        format!(
            "---\ntitle: {title}\nauthor: Someone\ndate: 2024-02-03\nrating: {rating}\ncoverImage: https://covers.example.com/{rating}.jpg\n---\nAbout {title}.\n"
        )
    }

    fn memory_store(books: &[(&str, f32)]) -> MemoryContentStore {
        books.iter().fold(
            MemoryContentStore::new(Arc::new(MarkdownRenderer)),
            |store, (title, rating)| store.with_document(*title, review(title, *rating)),
        )
    }

    #[tokio::test]
    async fn memory_store_lists_in_insertion_order() {
        let store = memory_store(&[("Dune", 8.0), ("Emma", 6.0)]);
        let books = store.list_books().await.unwrap();
        let titles: Vec<_> = books.iter().map(|book| book.title.as_str()).collect();
        assert_eq!(titles, vec!["Dune", "Emma"]);
        assert_eq!(books[0].summary.as_str(), "<p>About Dune.</p>\n");
    }

    #[tokio::test]
    async fn unknown_slug_is_absent_not_an_error() {
        let store = memory_store(&[("Dune", 8.0)]);
        assert!(store.get_book("emma").await.unwrap().is_none());
        assert!(store.get_book("../dune").await.unwrap().is_none());

        let content = store.get_book("dune").await.unwrap().unwrap();
        assert_eq!(content.metadata.title, "Dune");
        assert_eq!(content.source.as_str(), "<p>About Dune.</p>\n");
    }

    #[tokio::test]
    async fn duplicate_slugs_are_rejected() {
        let store = memory_store(&[("Dune", 8.0), ("DUNE", 7.0)]);
        let err = store.list_books().await.unwrap_err();
        match err {
            StoreError::DuplicateSlug { slug, first, second } => {
                assert_eq!(slug, "dune");
                assert_eq!(first, "Dune");
                assert_eq!(second, "DUNE");
            }
            other => panic!("expected duplicate slug, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_titles_are_rejected() {
        let with_slug = |rating: f32, slug: &str| {
            review("Dune", rating).replacen("title: Dune\n", &format!("title: Dune\nslug: {slug}\n"), 1)
        };
        let one = with_slug(8.0, "dune-one");
        let two = with_slug(7.0, "dune-two");
        let store = MemoryContentStore::new(Arc::new(MarkdownRenderer))
            .with_document("dune-one.md", one)
            .with_document("dune-two.md", two);

        match store.list_books().await.unwrap_err() {
            StoreError::DuplicateTitle { title, first, second } => {
                assert_eq!(title, "Dune");
                assert_eq!(first, "dune-one.md");
                assert_eq!(second, "dune-two.md");
            }
            other => panic!("expected duplicate title, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fs_store_reads_markdown_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b-emma.md"), review("Emma", 6.0)).unwrap();
        std::fs::write(dir.path().join("a-dune.md"), review("Dune", 8.0)).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a review").unwrap();
        std::fs::write(dir.path().join(".draft.md"), "---\nbroken").unwrap();
        std::fs::create_dir(dir.path().join("drafts.md")).unwrap();

        let store = FsContentStore::new(dir.path(), Arc::new(MarkdownRenderer));
        let books = store.list_books().await.unwrap();
        let slugs: Vec<_> = books.iter().map(|book| book.slug.as_str()).collect();
        assert_eq!(slugs, vec!["dune", "emma"]);

        let content = store.get_book("emma").await.unwrap().unwrap();
        assert_eq!(content.metadata.rating, 6.0);
        assert!(store.get_book("persuasion").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn fs_store_reports_the_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dune.md"), review("Dune", 8.0)).unwrap();
        std::fs::write(dir.path().join("emma.md"), "no front matter").unwrap();

        let store = FsContentStore::new(dir.path(), Arc::new(MarkdownRenderer));
        let err = store.list_books().await.unwrap_err();
        assert!(matches!(err, StoreError::Document { ref name, .. } if name == "emma.md"));
    }

    #[tokio::test]
    async fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsContentStore::new(dir.path().join("books"), Arc::new(MarkdownRenderer));
        let err = store.list_books().await.unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
