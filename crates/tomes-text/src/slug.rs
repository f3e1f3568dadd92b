//! Slug generation.

/// Convert text to a URL-safe anchor slug.
///
/// Lowercases the input, drops every character outside `[a-z0-9]`,
/// whitespace and `-`, trims, then joins the remaining whitespace-separated
/// runs with a single `-`. Existing hyphens are kept as they are.
///
/// Different inputs may produce the same slug; callers that need unique
/// anchors must deduplicate themselves.
///
/// # Examples
///
/// ```
/// use tomes_text::slugify;
///
/// assert_eq!(slugify("Hello, World! 2.0"), "hello-world-20");
/// assert_eq!(slugify("  multi   space  "), "multi-space");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|&c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c.is_whitespace())
        .collect();

    let mut slug = String::with_capacity(kept.len());
    for word in kept.split_whitespace() {
        if !slug.is_empty() {
            slug.push('-');
        }
        slug.push_str(word);
    }
    slug
}
