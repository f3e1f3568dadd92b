//! Storage key parsing.

use std::fmt;

/// Markdown file extension expected on every document key.
const EXTENSION: &str = ".md";

/// Identifier of a stored document, scoped by language.
///
/// Parsed from a storage key of the form `language/filename.md`. The ordering
/// (language, then file name) is only used for deterministic iteration; topic
/// ordering is derived elsewhere.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentKey {
    language: String,
    file_name: String,
}

impl DocumentKey {
    /// Parse a storage key.
    ///
    /// Returns `None` unless the key has exactly one `/`, a non-empty
    /// language, and a file name with a non-empty stem ending in `.md`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tomes_storage::DocumentKey;
    ///
    /// let key = DocumentKey::parse("en/001_intro.md").unwrap();
    /// assert_eq!(key.language(), "en");
    /// assert_eq!(key.stem(), "001_intro");
    /// assert!(DocumentKey::parse("en/nested/intro.md").is_none());
    /// ```
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        let (language, file_name) = key.split_once('/')?;
        if language.is_empty() || file_name.contains('/') {
            return None;
        }
        let stem = file_name.strip_suffix(EXTENSION)?;
        if stem.is_empty() {
            return None;
        }
        Some(Self {
            language: language.to_owned(),
            file_name: file_name.to_owned(),
        })
    }

    /// Build the key addressing `language/{stem}.md` directly.
    ///
    /// Returns `None` if the result would not be a valid key (e.g., the stem
    /// contains a `/`).
    #[must_use]
    pub fn for_stem(language: &str, stem: &str) -> Option<Self> {
        Self::parse(&format!("{language}/{stem}{EXTENSION}"))
    }

    /// Language namespace.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Raw file name including the extension.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// File name without the `.md` extension.
    #[must_use]
    pub fn stem(&self) -> &str {
        self.file_name
            .strip_suffix(EXTENSION)
            .unwrap_or(&self.file_name)
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.language, self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_key() {
        let key = DocumentKey::parse("en/getting-started.md").unwrap();

        assert_eq!(key.language(), "en");
        assert_eq!(key.file_name(), "getting-started.md");
        assert_eq!(key.stem(), "getting-started");
    }

    #[test]
    fn test_parse_rejects_missing_language() {
        assert!(DocumentKey::parse("/intro.md").is_none());
        assert!(DocumentKey::parse("intro.md").is_none());
    }

    #[test]
    fn test_parse_rejects_nested_paths() {
        assert!(DocumentKey::parse("en/guides/intro.md").is_none());
    }

    #[test]
    fn test_parse_rejects_other_extensions() {
        assert!(DocumentKey::parse("en/intro.txt").is_none());
        assert!(DocumentKey::parse("en/intro.MD").is_none());
        assert!(DocumentKey::parse("en/.md").is_none());
    }

    #[test]
    fn test_for_stem() {
        let key = DocumentKey::for_stem("de", "001_start").unwrap();

        assert_eq!(key.to_string(), "de/001_start.md");
        assert!(DocumentKey::for_stem("de", "a/b").is_none());
        assert!(DocumentKey::for_stem("de", "").is_none());
    }

    #[test]
    fn test_display_round_trips() {
        let key = DocumentKey::parse("fr/index.md").unwrap();

        assert_eq!(DocumentKey::parse(&key.to_string()), Some(key));
    }
}
