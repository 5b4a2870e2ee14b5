pub mod models;
pub mod source;
pub mod views;

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    http::Uri,
    response::Html,
    routing::get,
    Json, Router,
};
use portfolio_http::error::AppError;
use portfolio_kernel::{settings::Settings, InitCtx, Module};
use serde::Deserialize;
use serde_json::json;

use crate::layout::{Page, Shell};
use models::{Entry, Kind};
use source::CatalogSource;

const HOME_KINDS: &[Kind] = &[Kind::Projects];
const WRITING_KINDS: &[Kind] = &[Kind::Articles, Kind::Newsletters];

#[derive(Clone)]
struct CatalogState {
    source: CatalogSource,
    shell: Arc<Shell>,
}

/// Projects, articles and newsletters: the home and writing pages
pub struct CatalogModule {
    state: CatalogState,
}

impl CatalogModule {
    pub fn new(source: CatalogSource, shell: Arc<Shell>) -> Self {
        Self {
            state: CatalogState { source, shell },
        }
    }
}

#[async_trait]
impl Module for CatalogModule {
    fn name(&self) -> &'static str {
        "catalog"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let catalog = self
            .state
            .source
            .load()
            .await
            .context("failed to load catalog")?;

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            entries = catalog.len(),
            "catalog module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(list_entries))
            .route("/health", get(health_check))
            .with_state(self.state.clone())
    }

    fn pages(&self) -> Router {
        Router::new()
            .route("/", get(home_page))
            .route("/writing", get(writing_page))
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List catalog entries",
                        "tags": ["Catalog"],
                        "parameters": [{
                            "name": "kind",
                            "in": "query",
                            "required": false,
                            "schema": {
                                "type": "string",
                                "enum": ["projects", "articles", "newsletters"]
                            }
                        }],
                        "responses": {
                            "200": {
                                "description": "Catalog entries in file order",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": {
                                                "$ref": "#/components/schemas/CatalogEntry"
                                            }
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Unknown kind",
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
                        "summary": "Catalog health check",
                        "tags": ["Catalog"],
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
                    "CatalogEntry": {
                        "type": "object",
                        "properties": {
                            "content_type": {
                                "type": "string",
                                "enum": ["Projects", "Articles", "Newsletters"]
                            },
                            "title": { "type": "string" },
                            "date": { "type": "string" },
                            "description": { "type": "string" },
                            "links": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "label": { "type": "string" },
                                        "url": { "type": "string", "format": "uri" }
                                    },
                                    "required": ["label", "url"]
                                }
                            },
                            "image": { "type": "string", "format": "uri" },
                            "labels": { "type": "array", "items": { "type": "string" } }
                        },
                        "required": ["content_type", "title", "date", "description", "links", "image", "labels"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "catalog module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "catalog module stopped");
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct EntryFilter {
    kind: Option<String>,
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "catalog module is healthy"
}

async fn list_entries(
    State(state): State<CatalogState>,
    Query(filter): Query<EntryFilter>,
) -> Result<Json<Vec<Entry>>, AppError> {
    let kind = match filter.kind.as_deref() {
        Some(raw) => Some(raw.parse::<Kind>().map_err(|err| {
            AppError::bad_request(
                vec![json!({"field": "kind", "error": err.to_string()})],
                "Unknown catalog kind",
            )
        })?),
        None => None,
    };

    let catalog = state.source.load().await.map_err(AppError::internal)?;
    let entries = match kind {
        Some(kind) => catalog.of_kinds(&[kind]).into_iter().cloned().collect(),
        None => catalog.entries().to_vec(),
    };

    Ok(Json(entries))
}

async fn home_page(State(state): State<CatalogState>, uri: Uri) -> Result<Html<String>, AppError> {
    render(&state, uri.path(), None, HOME_KINDS).await
}

async fn writing_page(
    State(state): State<CatalogState>,
    uri: Uri,
) -> Result<Html<String>, AppError> {
    render(&state, uri.path(), Some("Writing"), WRITING_KINDS).await
}

async fn render(
    state: &CatalogState,
    path: &str,
    title: Option<&str>,
    kinds: &[Kind],
) -> Result<Html<String>, AppError> {
    let catalog = state.source.load().await.map_err(AppError::internal)?;
    let entries = catalog.of_kinds(kinds);

    let markup = state.shell.render(Page {
        path,
        title,
        index: None,
        body: views::sections(kinds, &entries),
    });

    Ok(Html(markup.into_string()))
}

/// Create the catalog module reading `<content.root>/catalog.json`
pub fn create_module(settings: &Settings, shell: Arc<Shell>) -> Arc<dyn Module> {
    let source = CatalogSource::new(settings.content.catalog_path());
    Arc::new(CatalogModule::new(source, shell))
}
