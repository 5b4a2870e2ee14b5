//! Project-specific utilities live here.

/// Derive a URL-safe slug from a title.
///
/// ASCII letters and digits are kept (lowercased), apostrophes are dropped,
/// and every other run of characters becomes a single `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch != '\'' && ch != '\u{2019}' {
            pending_dash = true;
        }
    }

    slug
}

/// True when `candidate` is already in the form [`slugify`] produces.
pub fn is_slug(candidate: &str) -> bool {
    !candidate.is_empty() && slugify(candidate) == candidate
}
