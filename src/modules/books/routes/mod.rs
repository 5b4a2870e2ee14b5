//! HTTP handlers for the books section: HTML pages and the JSON API.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::Uri,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use portfolio_http::error::AppError;

use super::models::{Book, BookContent};
use super::policy::{self, ViewState};
use super::store::ContentStore;
use super::views::{self, BOOKS_PATH};
use crate::layout::{Page, Shell};

#[derive(Clone)]
pub struct BooksState {
    pub store: Arc<dyn ContentStore>,
    pub shell: Arc<Shell>,
}

/// `/books`, `/books/` and everything below them.
pub fn pages(state: BooksState) -> Router {
    Router::new()
        .route(BOOKS_PATH, get(book_index))
        .route("/books/", get(book_index))
        .route("/books/{*rest}", get(book_path))
        .with_state(state)
}

/// JSON routes, mounted by the framework under `/api/books`.
pub fn api(state: BooksState) -> Router {
    Router::new()
        .route("/", get(list_books))
        .route("/health", get(health_check))
        .route("/{slug}", get(get_book))
        .with_state(state)
}

async fn book_index(State(state): State<BooksState>, uri: Uri) -> Result<Response, AppError> {
    render(&state, uri.path(), &[]).await
}

async fn book_path(
    State(state): State<BooksState>,
    Path(rest): Path<String>,
    uri: Uri,
) -> Result<Response, AppError> {
    let segments = policy::path_segments(&rest);
    render(&state, uri.path(), &segments).await
}

async fn render(state: &BooksState, path: &str, segments: &[&str]) -> Result<Response, AppError> {
    let view = policy::resolve(state.store.as_ref(), segments)
        .await
        .map_err(AppError::internal)?;

    let markup = match view {
        ViewState::ShowList { books } => state.shell.render(Page {
            path,
            title: Some("Books"),
            index: Some(views::bookshelf(&books, None)),
            body: views::list_view(&books),
        }),
        ViewState::ShowDetail { books, book } => state.shell.render(Page {
            path,
            title: Some(book.metadata.title.as_str()),
            index: Some(views::bookshelf(&books, Some(book.slug.as_str()))),
            body: views::detail_view(&book),
        }),
        ViewState::RedirectToList => {
            tracing::info!(path, "redirecting to book list");
            return Ok(Redirect::temporary(BOOKS_PATH).into_response());
        }
    };

    Ok(Html(markup.into_string()).into_response())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}

/// Every book, best rated first
async fn list_books(State(state): State<BooksState>) -> Result<Json<Vec<Book>>, AppError> {
    let books = state.store.list_books().await.map_err(AppError::internal)?;
    let sorted = views::sorted_by_rating(&books).into_iter().cloned().collect();
    Ok(Json(sorted))
}

async fn get_book(
    State(state): State<BooksState>,
    Path(slug): Path<String>,
) -> Result<Json<BookContent>, AppError> {
    state
        .store
        .get_book(&slug)
        .await
        .map_err(AppError::internal)?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("no book with slug '{}'", slug)))
}
