use maud::{html, Markup};

use super::models::{Entry, Kind};

pub fn entry_card(entry: &Entry) -> Markup {
    html! {
        article.entry {
            img.thumbnail src=(entry.image) alt=(entry.title) loading="lazy";
            div.entry-body {
                h3 { (entry.title) }
                p.meta { (entry.date) }
                @if !entry.description.is_empty() {
                    p { (entry.description) }
                }
                @if !entry.labels.is_empty() {
                    ul.labels {
                        @for label in &entry.labels {
                            li { (label) }
                        }
                    }
                }
                @for link in &entry.links {
                    a.entry-link href=(link.url) target="_blank" rel="noopener noreferrer" {
                        (link.label)
                    }
                    " "
                }
            }
        }
    }
}

/// One titled section per kind, skipping kinds with no entries.
pub fn sections(kinds: &[Kind], entries: &[&Entry]) -> Markup {
    html! {
        @for kind in kinds {
            @let of_kind = entries
                .iter()
                .filter(|entry| entry.content_type == *kind)
                .collect::<Vec<_>>();
            @if !of_kind.is_empty() {
                section.catalog-section id=(kind.as_str().to_ascii_lowercase()) {
                    h2 { (kind.as_str()) }
                    @for (index, entry) in of_kind.into_iter().enumerate() {
                        @if index > 0 {
                            hr.divider;
                        }
                        (entry_card(entry))
                    }
                }
            }
        }
    }
}
