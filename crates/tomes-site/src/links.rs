//! Document path building and relative link resolution.

use crate::entry::INDEX_SLUG;

/// Markdown extension accepted on relative links.
const MARKDOWN_EXTENSION: &str = ".md";

/// Build the navigation path of a document.
///
/// The `index` document of a language is addressed by the language path
/// alone. A trailing `/` on `base_path` is ignored.
///
/// # Examples
///
/// ```
/// use tomes_site::document_path;
///
/// assert_eq!(document_path("/docs", "en", "index"), "/docs/en");
/// assert_eq!(document_path("/docs/", "en", "intro"), "/docs/en/intro");
/// ```
#[must_use]
pub fn document_path(base_path: &str, language: &str, slug: &str) -> String {
    let base = base_path.trim_end_matches('/');
    if slug == INDEX_SLUG {
        format!("{base}/{language}")
    } else {
        format!("{base}/{language}/{slug}")
    }
}

/// Resolve an in-document relative link to a navigation path.
///
/// Handles `./{slug}` and `./{slug}.md`, optionally followed by a
/// `#fragment` that is carried over to the result. Any other link (absolute,
/// external, nested, or fragment-only) returns `None`.
///
/// # Examples
///
/// ```
/// use tomes_site::resolve_link;
///
/// assert_eq!(
///     resolve_link("./setup.md#install", "/docs", "en").as_deref(),
///     Some("/docs/en/setup#install")
/// );
/// assert_eq!(resolve_link("https://example.com", "/docs", "en"), None);
/// ```
#[must_use]
pub fn resolve_link(href: &str, base_path: &str, language: &str) -> Option<String> {
    let target = href.strip_prefix("./")?;
    let (target, fragment) = match target.split_once('#') {
        Some((target, fragment)) => (target, Some(fragment)),
        None => (target, None),
    };
    let slug = target.strip_suffix(MARKDOWN_EXTENSION).unwrap_or(target);
    if slug.is_empty() || slug.contains('/') {
        return None;
    }

    let mut path = document_path(base_path, language, slug);
    if let Some(fragment) = fragment {
        path.push('#');
        path.push_str(fragment);
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_path() {
        assert_eq!(document_path("/docs", "en", "intro"), "/docs/en/intro");
        assert_eq!(document_path("/docs", "de", "index"), "/docs/de");
    }

    #[test]
    fn test_document_path_root_base() {
        assert_eq!(document_path("/", "en", "index"), "/en");
        assert_eq!(document_path("", "en", "faq"), "/en/faq");
    }

    #[test]
    fn test_resolve_link_plain_and_markdown() {
        assert_eq!(
            resolve_link("./intro", "/docs", "en").as_deref(),
            Some("/docs/en/intro")
        );
        assert_eq!(
            resolve_link("./intro.md", "/docs", "en").as_deref(),
            Some("/docs/en/intro")
        );
    }

    #[test]
    fn test_resolve_link_index() {
        assert_eq!(
            resolve_link("./index.md", "/docs", "fr").as_deref(),
            Some("/docs/fr")
        );
    }

    #[test]
    fn test_resolve_link_keeps_fragment() {
        assert_eq!(
            resolve_link("./intro#setup", "/docs", "en").as_deref(),
            Some("/docs/en/intro#setup")
        );
        assert_eq!(
            resolve_link("./index.md#top", "/docs", "en").as_deref(),
            Some("/docs/en#top")
        );
    }

    #[test]
    fn test_resolve_link_rejects_other_links() {
        assert_eq!(resolve_link("intro.md", "/docs", "en"), None);
        assert_eq!(resolve_link("/docs/en/intro", "/docs", "en"), None);
        assert_eq!(resolve_link("#setup", "/docs", "en"), None);
        assert_eq!(resolve_link("./", "/docs", "en"), None);
        assert_eq!(resolve_link("./.md", "/docs", "en"), None);
        assert_eq!(resolve_link("./guides/intro.md", "/docs", "en"), None);
        assert_eq!(resolve_link("../intro.md", "/docs", "en"), None);
    }
}
