//! Portfolio site: book reviews, projects and writing served as HTML pages
//! with a read-only JSON API alongside.

pub mod layout;
pub mod modules;
pub mod utils;

use anyhow::Context;
use portfolio_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Register, initialize and start every module.
pub async fn bootstrap(settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings).context("failed to register modules")?;

    let ctx = InitCtx { settings };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    Ok(registry)
}

/// Bootstrap the modules and serve HTTP until shutdown.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let registry = bootstrap(settings).await?;

    let served = portfolio_http::start_server(&registry, settings).await;
    registry.stop_all().await?;

    served
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
        Router,
    };
    use portfolio_kernel::settings::ContentSettings;
    use tower::ServiceExt;

    use crate::modules::books::store::tests::review;

    fn content_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let books = dir.path().join("books");
        std::fs::create_dir(&books).unwrap();
        std::fs::write(books.join("dune.md"), review("Dune", 9.0)).unwrap();
        std::fs::write(books.join("emma.md"), review("Emma", 7.0)).unwrap();
        std::fs::write(
            dir.path().join("catalog.json"),
            r#"[{"content_type": "Projects", "title": "Shelf", "date": "Jan 2021", "image": "shelf.png"}]"#,
        )
        .unwrap();
        dir
    }

    fn settings(dir: &tempfile::TempDir) -> Settings {
        Settings {
            content: ContentSettings {
                root: dir.path().to_path_buf(),
            },
            ..Settings::default()
        }
    }

    async fn get(app: Router, path: &str) -> Response {
        app.oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn full_site_routes() {
        let dir = content_dir();
        let settings = settings(&dir);
        let registry = bootstrap(&settings).await.unwrap();
        let app = portfolio_http::build_router(&registry, &settings);

        let home = get(app.clone(), "/").await;
        assert_eq!(home.status(), StatusCode::OK);
        assert!(body_text(home).await.contains("Shelf"));

        let books = body_text(get(app.clone(), "/books").await).await;
        assert!(books.find("Dune").unwrap() < books.find("Emma").unwrap());

        let detail = get(app.clone(), "/books/dune").await;
        assert_eq!(detail.status(), StatusCode::OK);

        let redirect = get(app.clone(), "/books/a/b").await;
        assert_eq!(redirect.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(redirect.headers()[header::LOCATION], "/books");

        let api = get(app.clone(), "/api/books").await;
        assert_eq!(api.status(), StatusCode::OK);

        let missing = get(app.clone(), "/api/books/nope").await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let unknown = get(app, "/nowhere").await;
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

        registry.stop_all().await.unwrap();
    }

    #[tokio::test]
    async fn bootstrap_fails_on_broken_review() {
        let dir = content_dir();
        std::fs::write(dir.path().join("books").join("bad.md"), "no front matter").unwrap();

        let err = bootstrap(&settings(&dir))
            .await
            .err()
            .expect("broken review should stop startup");
        assert!(format!("{err:#}").contains("books"));
    }
}
