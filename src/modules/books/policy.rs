//! Decides what a `/books/...` request shows.

use super::models::{Book, BookContent};
use super::store::{ContentStore, StoreError};

/// Outcome of resolving a books request.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// `/books`: every book
    ShowList { books: Vec<Book> },
    /// `/books/{slug}` for a known slug; `books` feeds the page shell
    ShowDetail { books: Vec<Book>, book: BookContent },
    /// Unknown slug or a deeper path: send the client back to `/books`
    RedirectToList,
}

/// Split the part of the path below `/books` into segments, ignoring the
/// empty ones a trailing or doubled slash produces.
pub fn path_segments(rest: &str) -> Vec<&str> {
    rest.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// Resolve path segments against the store.
///
/// Only content-source failures are errors; unknown slugs and malformed
/// paths collapse into [`ViewState::RedirectToList`].
pub async fn resolve(store: &dyn ContentStore, segments: &[&str]) -> Result<ViewState, StoreError> {
    match segments {
        [] => {
            let books = store.list_books().await?;
            Ok(ViewState::ShowList { books })
        }
        [slug] => {
            let (books, book) = tokio::try_join!(store.list_books(), store.get_book(slug))?;
            match book {
                Some(book) => Ok(ViewState::ShowDetail { books, book }),
                None => {
                    tracing::debug!(slug = %slug, "unknown book slug, redirecting to list");
                    Ok(ViewState::RedirectToList)
                }
            }
        }
        _ => {
            tracing::debug!(depth = segments.len(), "nested books path, redirecting to list");
            Ok(ViewState::RedirectToList)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::render::MarkdownRenderer;
    use crate::modules::books::store::tests::review;
    use crate::modules::books::store::MemoryContentStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn library() -> MemoryContentStore {
        MemoryContentStore::new(Arc::new(MarkdownRenderer))
            .with_document("moby-dick.md", review("Moby-Dick", 9.0))
            .with_document("emma.md", review("Emma", 6.0))
    }

    /// Counts store calls and fails every one of them.
    #[derive(Default)]
    struct BrokenStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ContentStore for BrokenStore {
        async fn list_books(&self) -> Result<Vec<Book>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Io {
                path: "content/books".into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            })
        }

        async fn get_book(&self, _slug: &str) -> Result<Option<BookContent>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }
    }

    #[test]
    fn segments_ignore_empty_parts() {
        assert!(path_segments("").is_empty());
        assert_eq!(path_segments("moby-dick/"), vec!["moby-dick"]);
        assert_eq!(path_segments("a//b"), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn empty_path_shows_list() {
        let store = library();
        match resolve(&store, &[]).await.unwrap() {
            ViewState::ShowList { books } => assert_eq!(books.len(), 2),
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn known_slug_shows_detail_with_full_list() {
        let store = library();
        let expected = store.get_book("moby-dick").await.unwrap().unwrap();
        let all = store.list_books().await.unwrap();

        match resolve(&store, &["moby-dick"]).await.unwrap() {
            ViewState::ShowDetail { books, book } => {
                assert_eq!(book, expected);
                assert_eq!(books, all);
            }
            other => panic!("expected detail, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_slug_redirects() {
        let store = library();
        assert_eq!(
            resolve(&store, &["nonexistent"]).await.unwrap(),
            ViewState::RedirectToList
        );
    }

    #[tokio::test]
    async fn deep_paths_redirect_without_touching_the_store() {
        let store = library();
        assert_eq!(
            resolve(&store, &["moby-dick", "b"]).await.unwrap(),
            ViewState::RedirectToList
        );
        assert_eq!(
            resolve(&store, &["a", "b", "c"]).await.unwrap(),
            ViewState::RedirectToList
        );

        let broken = BrokenStore::default();
        assert_eq!(
            resolve(&broken, &["a", "b"]).await.unwrap(),
            ViewState::RedirectToList
        );
        assert_eq!(broken.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let broken = BrokenStore::default();
        assert!(matches!(
            resolve(&broken, &[]).await,
            Err(StoreError::Io { .. })
        ));
        assert!(matches!(
            resolve(&broken, &["moby-dick"]).await,
            Err(StoreError::Io { .. })
        ));
    }
}
