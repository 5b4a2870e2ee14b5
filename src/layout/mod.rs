//! Page shell shared by every HTML page: document head, navigation in both
//! presentations, and an optional section index above the content.

pub mod nav;

use maud::{html, Markup, PreEscaped, DOCTYPE};
use portfolio_kernel::settings::SiteSettings;

use nav::{Navigation, Presentation};

const STYLES: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; color: #1a202c; }
a { color: inherit; }
.sidebar { position: fixed; top: 5rem; left: 2rem; display: none; }
.menu-bar { position: fixed; top: 0; left: 0; right: 0; height: 3rem; display: flex;
  justify-content: flex-end; align-items: center; padding: 0 2rem;
  border-bottom: 1px solid #e2e8f0; background: #fff; z-index: 50; }
.nav-title { font-weight: bold; font-size: x-small; }
.nav-section ul, .nav-group ul { list-style: none; padding: 0; }
.nav-link { color: #718096; text-decoration: none; font-size: 1.1rem; }
.nav-link:hover, .nav-link.active { color: #000; }
main { max-width: 48rem; margin: 4rem auto 2rem; padding: 0 2rem; }
.bookshelf { display: flex; gap: 0.75rem; overflow-x: auto; }
.bookshelf img { height: 6rem; border: 1px solid #e2e8f0; }
.shelf-item.active img { outline: 2px solid #000; }
.book-entry, .entry { display: flex; gap: 1.5rem; align-items: flex-start; }
.book-entry .cover { height: 160px; border: 1px solid #e2e8f0; }
.meta, .author { color: #666; }
.labels { display: flex; flex-wrap: wrap; gap: 0.25rem; padding: 0; list-style: none; }
.labels li { background: #edf2f7; border-radius: 4px; padding: 0 0.4rem; font-size: small; }
@media (min-width: 62em) {
  .sidebar { display: block; }
  .menu-bar { display: none; }
  main { margin-top: 5rem; }
}
"#;

/// One page's worth of content handed to the shell.
pub struct Page<'a> {
    /// Request path, used to highlight the active navigation link
    pub path: &'a str,
    /// Page title; the site title is appended
    pub title: Option<&'a str>,
    /// Section index rendered above the content, divided from it by a rule
    pub index: Option<Markup>,
    pub body: Markup,
}

pub struct Shell {
    site_title: String,
    navigation: Navigation,
}

impl Shell {
    pub fn new(site_title: impl Into<String>, navigation: Navigation) -> Self {
        Self {
            site_title: site_title.into(),
            navigation,
        }
    }

    pub fn from_settings(site: &SiteSettings) -> Self {
        Self::new(site.title.clone(), Navigation::new(site.nav.clone()))
    }

    pub fn render(&self, page: Page<'_>) -> Markup {
        let title = match page.title {
            Some(title) => format!("{} | {}", title, self.site_title),
            None => self.site_title.clone(),
        };

        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (title) }
                    style { (PreEscaped(STYLES)) }
                }
                body {
                    (self.navigation.render(Presentation::Sidebar, page.path))
                    header.menu-bar {
                        (self.navigation.render(Presentation::Menu, page.path))
                    }
                    main {
                        @if let Some(index) = &page.index {
                            (index)
                            hr;
                        }
                        (page.body)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_title_includes_site_title() {
        let shell = Shell::from_settings(&SiteSettings::default());
        let html = shell
            .render(Page {
                path: "/books",
                title: Some("Books"),
                index: None,
                body: html! { p { "body" } },
            })
            .into_string();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Books | Portfolio</title>"));
        assert!(html.contains("<p>body</p>"));
        assert!(!html.contains("<hr>"));
    }

    #[test]
    fn navigation_is_rendered_twice() {
        let shell = Shell::from_settings(&SiteSettings::default());
        let html = shell
            .render(Page {
                path: "/",
                title: None,
                index: None,
                body: html! {},
            })
            .into_string();

        assert_eq!(html.matches("href=\"/books\"").count(), 2);
        assert!(html.contains("<title>Portfolio</title>"));
    }

    #[test]
    fn index_sits_above_body() {
        let shell = Shell::from_settings(&SiteSettings::default());
        let html = shell
            .render(Page {
                path: "/books",
                title: None,
                index: Some(html! { nav.bookshelf {} }),
                body: html! { p { "list" } },
            })
            .into_string();

        let index = html.find("<nav class=\"bookshelf\">").unwrap();
        let rule = html[index..].find("<hr>").unwrap() + index;
        let body = html.find("<p>list</p>").unwrap();
        assert!(index < rule && rule < body);
    }
}
