pub mod document;
pub mod models;
pub mod policy;
pub mod render;
pub mod routes;
pub mod store;
pub mod views;

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use axum::Router;
use portfolio_kernel::{settings::Settings, InitCtx, Module};

use crate::layout::Shell;
use render::MarkdownRenderer;
use routes::BooksState;
use store::{ContentStore, FsContentStore};

/// Book reviews: list and detail pages plus a read-only JSON API
pub struct BooksModule {
    state: BooksState,
}

impl BooksModule {
    pub fn new(store: Arc<dyn ContentStore>, shell: Arc<Shell>) -> Self {
        Self {
            state: BooksState { store, shell },
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    /// Loads every review once; broken content fails startup.
    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let books = self
            .state
            .store
            .list_books()
            .await
            .context("failed to load book reviews")?;

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books = books.len(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::api(self.state.clone())
    }

    fn pages(&self) -> Router {
        routes::pages(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books, best rated first",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "List of books",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": {
                                                "$ref": "#/components/schemas/Book"
                                            }
                                        }
                                    }
                                }
                            },
                            "500": {
                                "description": "Content source failure",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/{slug}": {
                    "get": {
                        "summary": "Full review of one book",
                        "tags": ["Books"],
                        "parameters": [{
                            "name": "slug",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": {
                                "description": "Book review",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/BookContent"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "No book with that slug",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Books health check",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": {
                                    "text/plain": {
                                        "schema": {
                                            "type": "string"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "slug": { "type": "string", "description": "URL-friendly identifier" },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "date": { "type": "string", "description": "Read date" },
                            "rating": { "type": "number", "minimum": 0, "maximum": 10 },
                            "coverImage": { "type": "string", "format": "uri" },
                            "summary": { "type": "string", "description": "Rendered HTML" }
                        },
                        "required": ["slug", "title", "author", "date", "rating", "coverImage", "summary"]
                    },
                    "BookContent": {
                        "type": "object",
                        "properties": {
                            "slug": { "type": "string" },
                            "metadata": {
                                "type": "object",
                                "properties": {
                                    "title": { "type": "string" },
                                    "author": { "type": "string" },
                                    "date": { "type": "string" },
                                    "rating": { "type": "number" }
                                },
                                "required": ["title", "author", "date", "rating"]
                            },
                            "source": { "type": "string", "description": "Rendered HTML" }
                        },
                        "required": ["slug", "metadata", "source"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create the books module reading reviews from `<content.root>/books`
pub fn create_module(settings: &Settings, shell: Arc<Shell>) -> Arc<dyn Module> {
    let store = FsContentStore::new(settings.content.books_dir(), Arc::new(MarkdownRenderer));
    Arc::new(BooksModule::new(Arc::new(store), shell))
}
