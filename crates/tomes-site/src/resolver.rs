//! Topic resolution with staged publishing.
//!
//! [`TopicResolver::resolve`] publishes [`TopicView`] snapshots on a
//! [`watch`] channel as the resolution progresses:
//!
//! 1. [`Stage::Listed`]: ordered topics with fallback titles
//! 2. [`Stage::ContentReady`]: content of the selected topic (or the
//!    not-found placeholder)
//! 3. [`Stage::Refined`]: topics with titles extracted from every document
//!
//! # Cancellation
//!
//! Every call to `resolve` starts a new generation. Each publish compares
//! the caller's generation with the one in the channel while holding the
//! channel lock, so a superseded call can never overwrite the view of a
//! newer request. Superseded calls return `None`.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinSet;
use tomes_storage::{DocumentKey, DocumentStore};

use crate::entry::DocumentEntry;
use crate::model::{Stage, TopicSummary, TopicView};
use crate::repository::Repository;

/// Placeholder content for a topic that cannot be resolved.
///
/// # Examples
///
/// ```
/// assert_eq!(tomes_site::not_found_content("en", "bogus"), "# 404\nNot found: en/bogus");
/// ```
#[must_use]
pub fn not_found_content(language: &str, requested_slug: &str) -> String {
    format!("# 404\nNot found: {language}/{requested_slug}")
}

/// Resolves topics of a language into published views.
///
/// Resolvers are cheap; the document cache lives in the shared
/// [`Repository`].
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use tomes_site::{Repository, TopicResolver};
///
/// let resolver = TopicResolver::new(Arc::new(Repository::new(storage)));
/// let mut views = resolver.subscribe();
///
/// if let Some(view) = resolver.resolve("en", "intro").await {
///     println!("{}", view.content);
/// }
/// ```
#[derive(Debug)]
pub struct TopicResolver<S> {
    repository: Arc<Repository<S>>,
    sender: watch::Sender<TopicView>,
}

impl<S: DocumentStore + 'static> TopicResolver<S> {
    /// Create a resolver publishing an empty pending view.
    #[must_use]
    pub fn new(repository: Arc<Repository<S>>) -> Self {
        Self {
            repository,
            sender: watch::Sender::new(TopicView::default()),
        }
    }

    /// Shared repository.
    #[must_use]
    pub fn repository(&self) -> &Arc<Repository<S>> {
        &self.repository
    }

    /// Subscribe to published views.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TopicView> {
        self.sender.subscribe()
    }

    /// Latest published view.
    #[must_use]
    pub fn current(&self) -> TopicView {
        self.sender.borrow().clone()
    }

    /// Resolve a topic, publishing each stage.
    ///
    /// Never fails: unknown topics and unreadable documents resolve to the
    /// [`not_found_content`] placeholder. Returns the final view, or `None`
    /// if a newer call superseded this one before it finished.
    pub async fn resolve(&self, language: &str, requested_slug: &str) -> Option<TopicView> {
        let generation = self.begin(language, requested_slug);

        let entries = self
            .repository
            .list_documents(language)
            .unwrap_or_else(|e| {
                tracing::warn!(language = %language, error = %e, "Failed to list documents");
                Vec::new()
            });
        let topics: Vec<TopicSummary> = entries.iter().map(TopicSummary::from).collect();
        if !self.publish(generation, |view| {
            view.stage = Stage::Listed;
            view.topics = topics;
        }) {
            return None;
        }

        let selected_index = entries
            .iter()
            .position(|entry| entry.display_slug() == requested_slug);
        let key = match selected_index {
            Some(index) => Some(entries[index].key().clone()),
            None => self.direct_key(language, requested_slug),
        };
        let (content, found) = self.load_content(key.as_ref(), language, requested_slug).await;
        if !self.publish(generation, |view| {
            view.stage = Stage::ContentReady;
            view.selected_index = selected_index;
            view.content = content;
            view.found = found;
        }) {
            return None;
        }

        let titles = self.refine_titles(&entries).await;
        let mut resolved = None;
        self.publish(generation, |view| {
            for (topic, title) in view.topics.iter_mut().zip(titles) {
                topic.title = title;
            }
            view.stage = Stage::Refined;
            resolved = Some(view.clone());
        });
        resolved
    }

    /// Start a new generation and reset the view for it.
    fn begin(&self, language: &str, requested_slug: &str) -> u64 {
        let mut generation = 0;
        self.sender.send_modify(|view| {
            generation = view.generation.wrapping_add(1);
            *view = TopicView::pending(generation, language, requested_slug);
        });
        tracing::debug!(language = %language, slug = %requested_slug, generation, "Resolving topic");
        generation
    }

    /// Apply `update` if `generation` is still current.
    ///
    /// Returns `false` when the request was superseded; the update is dropped.
    fn publish(&self, generation: u64, update: impl FnOnce(&mut TopicView)) -> bool {
        self.sender.send_if_modified(|view| {
            if view.generation != generation {
                return false;
            }
            update(view);
            true
        })
    }

    /// Key for a topic addressed by file stem rather than display slug.
    fn direct_key(&self, language: &str, requested_slug: &str) -> Option<DocumentKey> {
        DocumentKey::for_stem(language, requested_slug).filter(|key| self.repository.contains(key))
    }

    async fn load_content(
        &self,
        key: Option<&DocumentKey>,
        language: &str,
        requested_slug: &str,
    ) -> (String, bool) {
        let Some(key) = key else {
            return (not_found_content(language, requested_slug), false);
        };
        match self.repository.load(key).await {
            Ok(document) => (document.normalized_text.clone(), true),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load topic content");
                (not_found_content(language, requested_slug), false)
            }
        }
    }

    /// Load every entry concurrently and pick its display title.
    ///
    /// Titles come back in entry order. Entries that fail to load keep their
    /// fallback title.
    async fn refine_titles(&self, entries: &[DocumentEntry]) -> Vec<String> {
        let mut titles: Vec<String> = entries
            .iter()
            .map(|entry| entry.fallback_title().to_owned())
            .collect();

        let mut tasks = JoinSet::new();
        for (index, entry) in entries.iter().enumerate() {
            let repository = Arc::clone(&self.repository);
            let key = entry.key().clone();
            tasks.spawn(async move {
                let title = match repository.load(&key).await {
                    Ok(document) => document.extracted_title.clone(),
                    Err(e) => {
                        tracing::debug!(error = %e, "Keeping fallback title");
                        None
                    }
                };
                (index, title)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Some(title))) => titles[index] = title,
                Ok((_, None)) => {}
                Err(e) => tracing::warn!(error = %e, "Title refinement task failed"),
            }
        }
        titles
    }
}
