//! Text normalization.
//!
//! Rewrites raw document text into the canonical form consumed by the rest of
//! the engine: `\n` line endings everywhere, and inline `<br>` markers turned
//! into real line breaks outside fenced code regions.

use std::sync::LazyLock;

use regex::Regex;

/// Fence delimiter prefix (after leading whitespace is stripped).
const FENCE: &str = "```";

/// `<br>`, `<br/>`, `<br />` (any case) followed by whitespace or end of line.
///
/// The trailing whitespace character is consumed together with the marker.
static BREAK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>(?:\s|$)").expect("break tag pattern is valid"));

/// Normalize raw document text.
///
/// - `\r\n` and bare `\r` become `\n`.
/// - Outside fenced code regions, every standalone break marker becomes `\n`.
/// - A line whose trimmed start begins with three backticks toggles the fence
///   state and is emitted unchanged. Fences do not nest; indented code blocks
///   are ordinary lines.
///
/// # Examples
///
/// ```
/// use tomes_text::normalize;
///
/// assert_eq!(normalize("a<br> b\r\nc"), "a\nb\nc");
/// assert_eq!(normalize("```\n<br> kept\n```"), "```\n<br> kept\n```");
/// ```
#[must_use]
pub fn normalize(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");

    let mut output = String::with_capacity(unified.len());
    let mut in_fence = false;

    for (i, line) in unified.split('\n').enumerate() {
        if i > 0 {
            output.push('\n');
        }

        if is_fence_delimiter(line) {
            in_fence = !in_fence;
            output.push_str(line);
        } else if in_fence {
            output.push_str(line);
        } else {
            output.push_str(&BREAK_TAG.replace_all(line, "\n"));
        }
    }

    output
}

/// Check whether a line opens or closes a fenced code region.
fn is_fence_delimiter(line: &str) -> bool {
    line.trim_start().starts_with(FENCE)
}
