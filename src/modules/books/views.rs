//! HTML views for the books section.

use std::cmp::Ordering;

use maud::{html, Markup};

use super::models::{Book, BookContent};

pub const BOOKS_PATH: &str = "/books";

pub fn detail_href(slug: &str) -> String {
    format!("{}/{}", BOOKS_PATH, slug)
}

/// Books ordered by rating, highest first. Ties keep their input order and
/// the input slice is left untouched.
pub fn sorted_by_rating(books: &[Book]) -> Vec<&Book> {
    let mut sorted: Vec<&Book> = books.iter().collect();
    sorted.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));
    sorted
}

/// `2023-04-09` becomes `April 9, 2023`; anything else is shown as written.
pub fn format_read_date(raw: &str) -> String {
    let iso = time::macros::format_description!("[year]-[month]-[day]");
    let display = time::macros::format_description!("[month repr:long] [day padding:none], [year]");

    time::Date::parse(raw.trim(), &iso)
        .ok()
        .and_then(|date| date.format(&display).ok())
        .unwrap_or_else(|| raw.to_string())
}

pub fn format_rating(rating: f32) -> String {
    format!("{}/10", rating)
}

/// Every book, best rated first, with a divider between entries.
pub fn list_view(books: &[Book]) -> Markup {
    html! {
        section.book-list {
            @for (index, book) in sorted_by_rating(books).into_iter().enumerate() {
                article.book id=(book.slug) {
                    @if index > 0 {
                        hr.divider;
                    }
                    div.book-entry {
                        img.cover src=(book.cover_image) alt=(book.title);
                        div.book-body {
                            h2 { a href=(detail_href(&book.slug)) { (book.title) } }
                            p.author { (book.author) }
                            p.meta {
                                "Read: " (format_read_date(&book.date))
                                " \u{2022} Rating: " (format_rating(book.rating))
                            }
                            div.prose { (book.summary) }
                        }
                    }
                }
            }
        }
    }
}

/// One book's full review.
pub fn detail_view(book: &BookContent) -> Markup {
    let metadata = &book.metadata;
    html! {
        article.book-detail {
            header {
                h1 { (metadata.title) }
                p.meta {
                    "By: " (metadata.author)
                    " - Read: " (format_read_date(&metadata.date))
                    " - Rating: " (format_rating(metadata.rating))
                }
            }
            div.prose { (book.source) }
        }
    }
}

/// Persistent cover index shown above every books page.
pub fn bookshelf(books: &[Book], current: Option<&str>) -> Markup {
    html! {
        nav.bookshelf aria-label="Bookshelf" {
            @for book in sorted_by_rating(books) {
                @let active = current == Some(book.slug.as_str());
                a.shelf-item.active[active]
                    href=(detail_href(&book.slug))
                    title=(book.title)
                    aria-current=[active.then_some("page")] {
                    img src=(book.cover_image) alt=(book.title);
                }
            }
        }
    }
}
