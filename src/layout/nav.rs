//! Navigation model and its two presentations.

use maud::{html, Markup};
use portfolio_kernel::settings::{NavLink, NavSection};

/// How the navigation is laid out on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Fixed column beside the content on wide screens
    Sidebar,
    /// Collapsed drop-down on narrow screens
    Menu,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    sections: Vec<NavSection>,
}

impl Navigation {
    pub fn new(sections: Vec<NavSection>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[NavSection] {
        &self.sections
    }

    /// `/` is only active on the home page; every other link is active on
    /// any path that contains it.
    pub fn is_active(link: &NavLink, current_path: &str) -> bool {
        if link.href == "/" {
            current_path == "/"
        } else {
            current_path.contains(link.href.as_str())
        }
    }

    pub fn render(&self, presentation: Presentation, current_path: &str) -> Markup {
        match presentation {
            Presentation::Sidebar => html! {
                nav.sidebar aria-label="Site" {
                    @for section in &self.sections {
                        div.nav-section {
                            p.nav-title { (section.title) }
                            ul {
                                @for link in &section.links {
                                    li { (nav_link(link, current_path)) }
                                }
                            }
                        }
                    }
                }
            },
            Presentation::Menu => html! {
                details.nav-menu {
                    summary aria-label="Options" { "Menu" }
                    @for section in &self.sections {
                        div.nav-group role="group" aria-label=(section.title) {
                            p.nav-title { (section.title) }
                            ul {
                                @for link in &section.links {
                                    li { (nav_link(link, current_path)) }
                                }
                            }
                        }
                    }
                }
            },
        }
    }
}

fn nav_link(link: &NavLink, current_path: &str) -> Markup {
    let active = Navigation::is_active(link, current_path);

    if link.external || link.download.is_some() {
        let target = if link.external { "_blank" } else { "_self" };
        html! {
            a.nav-link.active[active]
                href=(link.href)
                target=(target)
                rel=[link.external.then_some("noopener noreferrer")]
                download=[link.download.as_deref()] {
                (link.label)
            }
        }
    } else {
        html! {
            a.nav-link.active[active]
                href=(link.href)
                aria-current=[active.then_some("page")] {
                (link.label)
            }
        }
    }
}
