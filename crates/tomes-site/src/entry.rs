//! Document entries derived from storage keys.
//!
//! Each key in a language namespace becomes a [`DocumentEntry`] carrying the
//! navigation slug, sort position, and a title derived from the file name.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use tomes_storage::DocumentKey;

/// Stem of the landing document of a language.
pub(crate) const INDEX_SLUG: &str = "index";

/// Two or three ASCII digits, `_` or `-`, then the display slug.
static ORDER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2,3})[_-](.+)$").expect("order prefix pattern is valid"));

/// Sort position of a document within its language.
///
/// The derived ordering places [`Order::First`] before every position and
/// [`Order::Last`] after every position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Order {
    /// The `index` document.
    First,
    /// Explicit numeric prefix (e.g., `010` in `010-advanced.md`).
    Position(u32),
    /// Documents without a numeric prefix.
    Last,
}

/// Navigation entry for one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentEntry {
    key: DocumentKey,
    display_slug: String,
    order: Order,
    fallback_title: String,
}

impl DocumentEntry {
    /// Derive the entry for a storage key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tomes_site::{DocumentEntry, Order};
    /// use tomes_storage::DocumentKey;
    ///
    /// let key = DocumentKey::parse("en/010-getting-started.md").unwrap();
    /// let entry = DocumentEntry::from_key(key);
    /// assert_eq!(entry.display_slug(), "getting-started");
    /// assert_eq!(entry.order(), Order::Position(10));
    /// assert_eq!(entry.fallback_title(), "Getting Started");
    /// ```
    #[must_use]
    pub fn from_key(key: DocumentKey) -> Self {
        let stem = key.stem();
        let (order, display_slug) = match ORDER_PREFIX.captures(stem) {
            // At most three digits always fit
            Some(caps) => match caps[1].parse::<u32>() {
                Ok(position) => (Order::Position(position), caps[2].to_owned()),
                Err(_) => (Order::Last, stem.to_owned()),
            },
            None if stem == INDEX_SLUG => (Order::First, stem.to_owned()),
            None => (Order::Last, stem.to_owned()),
        };
        let fallback_title = fallback_title(&display_slug);

        Self {
            key,
            display_slug,
            order,
            fallback_title,
        }
    }

    /// Storage key of the document.
    #[must_use]
    pub fn key(&self) -> &DocumentKey {
        &self.key
    }

    /// File name stem, including any order prefix.
    #[must_use]
    pub fn slug(&self) -> &str {
        self.key.stem()
    }

    /// Slug used in navigation (stem without the order prefix).
    #[must_use]
    pub fn display_slug(&self) -> &str {
        &self.display_slug
    }

    /// Sort position.
    #[must_use]
    pub fn order(&self) -> Order {
        self.order
    }

    /// Title derived from the display slug.
    #[must_use]
    pub fn fallback_title(&self) -> &str {
        &self.fallback_title
    }

    /// Total order used for topic lists.
    pub(crate) fn cmp_for_listing(&self, other: &Self) -> Ordering {
        self.order
            .cmp(&other.order)
            .then_with(|| compare_titles(&self.fallback_title, &other.fallback_title))
            .then_with(|| self.key.cmp(&other.key))
    }
}

/// Turn a slug into a human title.
///
/// Replaces `-` and `_` with spaces and uppercases the first letter of every
/// whitespace-delimited word. Spacing is preserved as-is.
///
/// # Examples
///
/// ```
/// use tomes_site::fallback_title;
///
/// assert_eq!(fallback_title("getting-started"), "Getting Started");
/// assert_eq!(fallback_title("api__v2"), "Api  V2");
/// ```
#[must_use]
pub fn fallback_title(slug: &str) -> String {
    let mut title = String::with_capacity(slug.len());
    let mut at_word_start = true;

    for c in slug.chars() {
        let c = if c == '-' || c == '_' { ' ' } else { c };
        if c.is_whitespace() {
            at_word_start = true;
            title.push(c);
        } else if at_word_start {
            at_word_start = false;
            title.extend(c.to_uppercase());
        } else {
            title.push(c);
        }
    }
    title
}

/// Compare titles ignoring case first.
///
/// Titles that differ only in case put the lowercase letter first
/// (`beta` before `Beta`), falling back to code point order.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(key: &str) -> DocumentEntry {
        DocumentEntry::from_key(DocumentKey::parse(key).unwrap())
    }

    #[test]
    fn test_index_sorts_first() {
        let entry = entry("en/index.md");

        assert_eq!(entry.order(), Order::First);
        assert_eq!(entry.display_slug(), "index");
        assert_eq!(entry.fallback_title(), "Index");
    }

    #[test]
    fn test_numeric_prefixes() {
        let underscore = entry("en/001_intro.md");
        let hyphen = entry("en/010-advanced.md");
        let three = entry("en/999_last.md");

        assert_eq!(underscore.order(), Order::Position(1));
        assert_eq!(underscore.display_slug(), "intro");
        assert_eq!(underscore.slug(), "001_intro");
        assert_eq!(hyphen.order(), Order::Position(10));
        assert_eq!(hyphen.display_slug(), "advanced");
        assert_eq!(three.order(), Order::Position(999));
    }

    #[test]
    fn test_prefix_requires_two_or_three_digits() {
        let one = entry("en/1_intro.md");
        let four = entry("en/2024-notes.md");
        let bare = entry("en/01_.md");

        assert_eq!(one.order(), Order::Last);
        assert_eq!(one.display_slug(), "1_intro");
        assert_eq!(four.order(), Order::Last);
        assert_eq!(four.display_slug(), "2024-notes");
        assert_eq!(bare.order(), Order::Last);
    }

    #[test]
    fn test_prefixed_index_is_positioned() {
        let entry = entry("en/005_index.md");

        assert_eq!(entry.order(), Order::Position(5));
        assert_eq!(entry.display_slug(), "index");
    }

    #[test]
    fn test_unprefixed_sorts_last() {
        let entry = entry("en/readme.md");

        assert_eq!(entry.order(), Order::Last);
        assert_eq!(entry.display_slug(), "readme");
    }

    #[test]
    fn test_order_sentinels() {
        assert!(Order::First < Order::Position(0));
        assert!(Order::Position(999) < Order::Last);
        assert!(Order::Position(2) < Order::Position(10));
    }

    #[test]
    fn test_fallback_title() {
        assert_eq!(fallback_title("getting-started"), "Getting Started");
        assert_eq!(fallback_title("snake_case_name"), "Snake Case Name");
        assert_eq!(fallback_title("already Spaced"), "Already Spaced");
        assert_eq!(fallback_title("a--b"), "A  B");
        assert_eq!(fallback_title("v2-über"), "V2 Über");
        assert_eq!(fallback_title(""), "");
    }

    #[test]
    fn test_listing_order() {
        let mut entries = vec![
            entry("en/readme.md"),
            entry("en/010-advanced.md"),
            entry("en/index.md"),
            entry("en/001_intro.md"),
        ];

        entries.sort_by(DocumentEntry::cmp_for_listing);

        let slugs: Vec<&str> = entries.iter().map(DocumentEntry::display_slug).collect();
        assert_eq!(slugs, vec!["index", "intro", "advanced", "readme"]);
    }

    #[test]
    fn test_listing_ties_compare_titles_case_insensitively() {
        let mut entries = vec![
            entry("en/zeta.md"),
            entry("en/Beta.md"),
            entry("en/alpha.md"),
            entry("en/beta.md"),
        ];

        entries.sort_by(DocumentEntry::cmp_for_listing);

        let slugs: Vec<&str> = entries.iter().map(DocumentEntry::slug).collect();
        assert_eq!(slugs, vec!["alpha", "beta", "Beta", "zeta"]);
    }

    #[test]
    fn test_case_only_ties_put_lowercase_first() {
        assert_eq!(compare_titles("beta", "Beta"), Ordering::Less);
        assert_eq!(compare_titles("BETA", "Beta"), Ordering::Greater);
        assert_eq!(compare_titles("Beta", "Beta"), Ordering::Equal);
        assert_eq!(compare_titles("alpha", "Beta"), Ordering::Less);
    }
}
