//! Title extraction.

use std::sync::LazyLock;

use regex::Regex;

/// First line starting with one or more `#`, a space, then text.
static TITLE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#+ (.+)$").expect("title pattern is valid"));

/// Extract a document title from normalized text.
///
/// Scans top to bottom for the first line that starts with a heading marker
/// of any level followed by a space, and returns its trimmed text. Returns
/// `None` when no such line exists or its text is blank.
///
/// # Examples
///
/// ```
/// use tomes_text::extract_title;
///
/// assert_eq!(extract_title("intro\n## Setup\n# Later").as_deref(), Some("Setup"));
/// assert_eq!(extract_title("no headings"), None);
/// ```
#[must_use]
pub fn extract_title(text: &str) -> Option<String> {
    let caps = TITLE_LINE.captures(text)?;
    let title = caps[1].trim();
    (!title.is_empty()).then(|| title.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title_from_h1() {
        assert_eq!(
            extract_title("# Getting Started\n\nText.").as_deref(),
            Some("Getting Started")
        );
    }

    #[test]
    fn test_extract_title_any_level_first_wins() {
        assert_eq!(
            extract_title("Preamble\n\n### Deep\n# Top").as_deref(),
            Some("Deep")
        );
    }

    #[test]
    fn test_extract_title_trims() {
        assert_eq!(extract_title("#   Spaced   \n").as_deref(), Some("Spaced"));
    }

    #[test]
    fn test_extract_title_requires_line_start() {
        assert_eq!(extract_title("  # Indented\ntext"), None);
    }

    #[test]
    fn test_extract_title_requires_space() {
        assert_eq!(extract_title("#hashtag\n#NoSpace"), None);
    }

    #[test]
    fn test_extract_title_blank_heading() {
        assert_eq!(extract_title("#    \n# Real"), None);
    }

    #[test]
    fn test_extract_title_none() {
        assert_eq!(extract_title(""), None);
    }
}
