//! Heading outline extraction.
//!
//! Produces the flat table of contents for a document. The scan is purely
//! line based: it does not track fenced code regions, so heading-like lines
//! inside fences are reported too.

use std::sync::LazyLock;

use regex::Regex;

use crate::slug::slugify;

/// One to six `#`, a single space, then the heading text.
static HEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6}) (.+)$").expect("heading pattern is valid"));

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TocEntry {
    /// Anchor ID for linking (not unique within a document).
    pub id: String,
    /// Heading text with backticks removed.
    pub text: String,
    /// Heading level (1-6).
    pub level: u8,
}

/// Extract the heading outline of normalized text.
///
/// Every trimmed line matching the heading pattern yields one entry, in
/// document order. Entries are neither filtered by level nor deduplicated.
///
/// # Examples
///
/// ```
/// use tomes_text::extract_outline;
///
/// let toc = extract_outline("# Title\n\nSome text\n## Sub `code` Heading\n");
/// assert_eq!(toc.len(), 2);
/// assert_eq!(toc[1].text, "Sub code Heading");
/// assert_eq!(toc[1].id, "sub-code-heading");
/// ```
#[must_use]
pub fn extract_outline(text: &str) -> Vec<TocEntry> {
    text.lines()
        .filter_map(|line| parse_heading(line.trim()))
        .collect()
}

/// Parse a single trimmed line as a heading.
fn parse_heading(line: &str) -> Option<TocEntry> {
    let caps = HEADING_LINE.captures(line)?;
    let level = u8::try_from(caps[1].len()).ok()?;
    let text = caps[2].replace('`', "").trim().to_owned();
    let id = slugify(&text);
    Some(TocEntry { id, text, level })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(level: u8, text: &str, id: &str) -> TocEntry {
        TocEntry {
            id: id.to_owned(),
            text: text.to_owned(),
            level,
        }
    }

    #[test]
    fn test_outline_basic() {
        let toc = extract_outline("# Title\n\nSome text\n## Sub `code` Heading\n");

        assert_eq!(
            toc,
            vec![
                entry(1, "Title", "title"),
                entry(2, "Sub code Heading", "sub-code-heading"),
            ]
        );
    }

    #[test]
    fn test_outline_all_levels() {
        let text = "# A\n## B\n### C\n#### D\n##### E\n###### F\n####### G";
        let levels: Vec<u8> = extract_outline(text).iter().map(|e| e.level).collect();

        assert_eq!(levels, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_outline_trims_lines() {
        let toc = extract_outline("   ## Indented   \n");

        assert_eq!(toc, vec![entry(2, "Indented", "indented")]);
    }

    #[test]
    fn test_outline_requires_space_after_marker() {
        assert!(extract_outline("#tag\n##\n#").is_empty());
    }

    #[test]
    fn test_outline_keeps_duplicates() {
        let toc = extract_outline("## FAQ\n## FAQ");

        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].id, "faq");
        assert_eq!(toc[1].id, "faq");
    }

    #[test]
    fn test_outline_scans_fenced_lines() {
        let toc = extract_outline("```bash\n# install deps\n```\n## Usage");

        assert_eq!(
            toc,
            vec![
                entry(1, "install deps", "install-deps"),
                entry(2, "Usage", "usage"),
            ]
        );
    }

    #[test]
    fn test_outline_text_of_only_backticks() {
        let toc = extract_outline("## ``");

        assert_eq!(toc, vec![entry(2, "", "")]);
    }

    #[test]
    fn test_outline_empty() {
        assert!(extract_outline("").is_empty());
    }
}
