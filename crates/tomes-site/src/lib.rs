//! Document repository and topic resolution for Tomes.
//!
//! This crate turns a [`DocumentStore`](tomes_storage::DocumentStore) of
//! localized Markdown files into navigable topics:
//!
//! - [`Repository`]: ordered document listing per language and a
//!   single-flight cache of normalized content
//! - [`TopicResolver`]: staged resolution of a topic into a [`TopicView`],
//!   with cancellation of superseded requests
//! - [`document_path`] and [`resolve_link`]: navigation path building
//!
//! # Ordering
//!
//! Documents are ordered by an optional numeric file name prefix:
//!
//! ```text
//! en/
//! ├── index.md          → index      (always first)
//! ├── 001_intro.md      → intro
//! ├── 010-advanced.md   → advanced
//! └── readme.md         → readme     (unprefixed, last)
//! ```
//!
//! Ties are broken by the title derived from the file name.

mod entry;
mod links;
mod model;
mod repository;
mod resolver;

pub use entry::{DocumentEntry, Order, fallback_title};
pub use links::{document_path, resolve_link};
pub use model::{DocumentModel, Stage, TopicLink, TopicSummary, TopicView};
pub use repository::{CachedDocument, LoadError, Repository};
pub use resolver::{TopicResolver, not_found_content};
