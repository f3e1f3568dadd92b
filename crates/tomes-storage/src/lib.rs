//! Document store abstraction for the Tomes topic engine.
//!
//! This crate provides a [`DocumentStore`] trait that decouples document
//! enumeration and raw content retrieval from the storage backend. Keys follow
//! the `language/filename.md` convention and are parsed into [`DocumentKey`].
//!
//! # Architecture
//!
//! The crate provides:
//! - [`DocumentStore`] trait with `keys()`, `fetch()`, and `contains()` methods
//! - [`FsStorage`] for a `<source_dir>/<language>/<file>.md` directory layout
//! - [`MemoryStorage`] for tests and embedding (behind the `memory` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use tomes_storage::{DocumentStore, FsStorage};
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! for key in storage.keys()? {
//!     let raw = storage.fetch(&key).await?;
//!     println!("{key}: {} bytes", raw.len());
//! }
//! ```

mod fs;
mod key;
#[cfg(any(test, feature = "memory"))]
mod memory;
mod storage;

pub use fs::FsStorage;
pub use key::DocumentKey;
#[cfg(any(test, feature = "memory"))]
pub use memory::MemoryStorage;
pub use storage::{DocumentStore, ErrorStatus, StorageError, StorageErrorKind};
