//! Published topic state and renderer output.

use serde::Serialize;
use tomes_text::{TocEntry, extract_outline};

use crate::entry::DocumentEntry;
use crate::links::document_path;

/// Progress of a resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    /// Request accepted, nothing published yet.
    #[default]
    Pending,
    /// Topic list published with fallback titles.
    Listed,
    /// Content of the selected topic published.
    ContentReady,
    /// Topic list republished with extracted titles.
    Refined,
}

/// Sidebar entry for one topic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TopicSummary {
    /// Display slug.
    pub slug: String,
    /// Extracted title when known, otherwise the fallback title.
    pub title: String,
}

impl From<&DocumentEntry> for TopicSummary {
    fn from(entry: &DocumentEntry) -> Self {
        Self {
            slug: entry.display_slug().to_owned(),
            title: entry.fallback_title().to_owned(),
        }
    }
}

/// Topic with its navigation path, as handed to renderers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TopicLink {
    /// Display slug.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Navigation path (e.g., `/docs/en/intro`).
    pub path: String,
}

impl TopicLink {
    fn new(topic: &TopicSummary, base_path: &str, language: &str) -> Self {
        Self {
            slug: topic.slug.clone(),
            title: topic.title.clone(),
            path: document_path(base_path, language, &topic.slug),
        }
    }
}

/// Snapshot of a resolution published by
/// [`TopicResolver`](crate::TopicResolver).
///
/// Views are replaced wholesale or updated in place for the request that
/// owns them; a view never mixes state from two requests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TopicView {
    pub(crate) generation: u64,
    /// Requested language.
    pub language: String,
    /// Requested topic slug.
    pub requested_slug: String,
    /// How far the resolution has progressed.
    pub stage: Stage,
    /// Ordered topics of the language.
    pub topics: Vec<TopicSummary>,
    /// Position of the selected topic in `topics`.
    ///
    /// `None` when the content came from a direct key or was not found.
    pub selected_index: Option<usize>,
    /// Normalized content of the selected topic, or the not-found placeholder.
    pub content: String,
    /// Whether `content` is a real document.
    pub found: bool,
}

impl TopicView {
    pub(crate) fn pending(generation: u64, language: &str, requested_slug: &str) -> Self {
        Self {
            generation,
            language: language.to_owned(),
            requested_slug: requested_slug.to_owned(),
            ..Self::default()
        }
    }

    /// Request generation this view belongs to.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Previous and next topics around the selection.
    #[must_use]
    pub fn neighbors(&self) -> (Option<&TopicSummary>, Option<&TopicSummary>) {
        let Some(index) = self.selected_index else {
            return (None, None);
        };
        let previous = index.checked_sub(1).and_then(|i| self.topics.get(i));
        let next = self.topics.get(index + 1);
        (previous, next)
    }

    /// Heading outline of the current content.
    #[must_use]
    pub fn outline(&self) -> Vec<TocEntry> {
        extract_outline(&self.content)
    }

    /// Build the renderer model, with paths under `base_path`.
    #[must_use]
    pub fn document_model(&self, base_path: &str) -> DocumentModel {
        let link = |topic: &TopicSummary| TopicLink::new(topic, base_path, &self.language);
        let (previous, next) = self.neighbors();

        DocumentModel {
            normalized_content: self.content.clone(),
            topics: self.topics.iter().map(link).collect(),
            current_slug: self.requested_slug.clone(),
            toc: self.outline(),
            previous: previous.map(link),
            next: next.map(link),
            found: self.found,
        }
    }
}

/// Resolved document as consumed by renderers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentModel {
    /// Normalized Markdown of the current document.
    pub normalized_content: String,
    /// Ordered topics of the language.
    pub topics: Vec<TopicLink>,
    /// Requested topic slug.
    pub current_slug: String,
    /// Heading outline of the content.
    pub toc: Vec<TocEntry>,
    /// Previous topic in navigation order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<TopicLink>,
    /// Next topic in navigation order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<TopicLink>,
    /// Whether the content is a real document.
    pub found: bool,
}
