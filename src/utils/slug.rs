//! Filename slugs for new posts.

use deunicode::deunicode;

/// Characters forbidden in file paths
const FORBIDDEN_CHARS: &[char] = &[
    '<', '>', ':', '|', '?', '*', '#', '\\', '/', '"', '(', ')', '[', ']', '\t', '\r', '\n',
];

/// Convert a post title into a lowercase, hyphen-separated ASCII file stem.
///
/// Falls back to `"post"` when nothing usable remains.
pub fn slugify(title: &str) -> String {
    let ascii = deunicode(title);
    let mut slug = String::with_capacity(ascii.len());
    let mut prev_hyphen = true;

    for c in ascii.chars().filter(|c| !FORBIDDEN_CHARS.contains(c)) {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() { "post".into() } else { slug }
}
