//! Markdown text normalization and structural analysis.
//!
//! This crate provides the pure text functions the topic engine runs over
//! every document:
//!
//! - [`normalize`]: canonical line endings and `<br>` conversion outside fences
//! - [`slugify`]: URL-safe anchor identifiers
//! - [`extract_title`]: first heading line of a document
//! - [`extract_outline`]: flat heading outline for tables of contents
//!
//! All functions are deterministic and allocation-light; none of them track
//! Markdown semantics beyond what each one documents.
//!
//! # Example
//!
//! ```
//! use tomes_text::{extract_outline, extract_title, normalize};
//!
//! let text = normalize("# Guide\r\n\r\nLine one<br> line two\r\n## Setup\r\n");
//! assert_eq!(extract_title(&text).as_deref(), Some("Guide"));
//!
//! let toc = extract_outline(&text);
//! assert_eq!(toc[1].id, "setup");
//! ```

mod normalize;
mod outline;
mod slug;
mod title;

pub use normalize::normalize;
pub use outline::{TocEntry, extract_outline};
pub use slug::slugify;
pub use title::extract_title;
