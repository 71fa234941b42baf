//! Linear-scan search engine
//!
//! Provides:
//! - Case-insensitive substring search over titles and/or content
//! - Advanced search combining a text predicate with date, tag and folder filters
//! - Result summaries for display layers
//!
//! Results always follow the store's display order.

use chrono::{DateTime, Utc};
use notebase_core::prelude::*;
use notebase_store::NoteStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::instrument;

const PREVIEW_CHARS: usize = 200;

/// Search result metadata for display layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: NoteId,
    pub title: String,
    pub path: String,
    /// Content preview (first 200 chars)
    pub preview: String,
    pub tags: BTreeSet<String>,
    /// Titles this note links to
    pub links: BTreeSet<String>,
    /// Number of notes linking to this note's title
    pub backlink_count: usize,
    pub updated_at: DateTime<Utc>,
}

impl SearchHit {
    pub fn from_note(note: &Note, store: &NoteStore) -> Self {
        Self {
            id: note.id(),
            title: note.title().to_string(),
            path: note.path().to_string(),
            preview: note.content().chars().take(PREVIEW_CHARS).collect(),
            tags: note.tags().clone(),
            links: note.links().clone(),
            backlink_count: store.link_graph().backlinks(note.title()).len(),
            updated_at: note.updated_at(),
        }
    }
}

/// Advanced search builder
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    text: Option<String>,
    filter: SearchFilter,
}

impl SearchQuery {
    /// Create new search query; blank text means "no text predicate"
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            text: (!text.trim().is_empty()).then_some(text),
            filter: SearchFilter::default(),
        }
    }

    /// Query with filters only
    pub fn filters_only() -> Self {
        Self::default()
    }

    pub fn scope(mut self, scope: ContentScope) -> Self {
        self.filter.scope = scope;
        self
    }

    pub fn updated_within(mut self, range: DateRange) -> Self {
        self.filter.date_range = range;
        self
    }

    /// Add tag filter (OR'd with other tags)
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for tag in tags {
            self.filter = self.filter.with_tag(tag);
        }
        self
    }

    /// Add folder filter (OR'd with other folders)
    pub fn in_folders(mut self, folders: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for folder in folders {
            self.filter = self.filter.with_folder(folder);
        }
        self
    }

    /// Get the query parameters
    pub fn build(self) -> (Option<String>, SearchFilter) {
        (self.text, self.filter)
    }
}

/// Stateless query evaluator over a note store
pub struct SearchEngine<'a> {
    store: &'a NoteStore,
    fields: SimpleSearchFields,
}

impl<'a> SearchEngine<'a> {
    /// Engine matching both titles and content in simple search
    pub fn new(store: &'a NoteStore) -> Self {
        Self {
            store,
            fields: SimpleSearchFields::default(),
        }
    }

    /// Engine using the configured simple search fields
    pub fn with_config(store: &'a NoteStore, config: &EngineConfig) -> Self {
        Self::new(store).with_fields(config.simple_search_fields)
    }

    pub fn with_fields(mut self, fields: SimpleSearchFields) -> Self {
        self.fields = fields;
        self
    }

    /// Notes whose title and/or content contain `query`, ignoring case.
    ///
    /// A blank query matches nothing.
    #[instrument(skip(self), name = "search_simple")]
    pub fn search(&self, query: &str) -> Vec<&'a Note> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();

        let results: Vec<_> = self
            .store
            .notes()
            .filter(|note| match self.fields {
                SimpleSearchFields::TitleAndContent => {
                    contains_ci(note.title(), &needle) || contains_ci(note.content(), &needle)
                }
                SimpleSearchFields::Title => contains_ci(note.title(), &needle),
                SimpleSearchFields::Content => contains_ci(note.content(), &needle),
            })
            .collect();

        log::debug!("Simple search '{}' matched {} notes", query, results.len());
        results
    }

    /// Advanced search evaluated against the current time
    pub fn advanced_search(&self, filter: &SearchFilter, query: Option<&str>) -> Vec<&'a Note> {
        self.advanced_search_at(filter, query, Utc::now())
    }

    /// Advanced search with date buckets ending at `now`.
    ///
    /// With no text and no date, tag or folder predicate the result is empty:
    /// nothing has been asked for yet.
    #[instrument(skip(self, filter), name = "search_advanced")]
    pub fn advanced_search_at(
        &self,
        filter: &SearchFilter,
        query: Option<&str>,
        now: DateTime<Utc>,
    ) -> Vec<&'a Note> {
        let needle = query
            .filter(|q| !q.trim().is_empty())
            .map(str::to_lowercase);

        if needle.is_none() && !filter.has_active_predicates() {
            return Vec::new();
        }

        let results: Vec<_> = self
            .store
            .notes()
            .filter(|note| {
                needle
                    .as_deref()
                    .is_none_or(|needle| matches_scope(note, filter.scope, needle))
            })
            .filter(|note| filter.date_range.admits(note.updated_at(), now))
            .filter(|note| filter.tags.is_empty() || filter.tags.iter().any(|t| note.has_tag(t)))
            .filter(|note| filter.folders.is_empty() || filter.folders.contains(note.folder()))
            .collect();

        log::debug!(
            "Advanced search {:?} with {:?} matched {} notes",
            query,
            filter,
            results.len()
        );
        results
    }

    /// Run a built [`SearchQuery`]
    pub fn run(&self, query: SearchQuery) -> Vec<&'a Note> {
        let (text, filter) = query.build();
        self.advanced_search(&filter, text.as_deref())
    }

    /// Notes carrying `tag`
    pub fn search_by_tag(&self, tag: &str) -> Vec<&'a Note> {
        self.store.notes().filter(|note| note.has_tag(tag)).collect()
    }

    /// Summaries for a result list
    pub fn hits(&self, notes: &[&Note]) -> Vec<SearchHit> {
        notes
            .iter()
            .map(|note| SearchHit::from_note(note, self.store))
            .collect()
    }
}

fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

fn matches_scope(note: &Note, scope: ContentScope, needle: &str) -> bool {
    match scope {
        ContentScope::All => {
            contains_ci(note.title(), needle)
                || contains_ci(note.content(), needle)
                || contains_ci(note.path(), needle)
        }
        ContentScope::Title => contains_ci(note.title(), needle),
        ContentScope::Content => contains_ci(note.content(), needle),
        ContentScope::Path => contains_ci(note.path(), needle),
    }
}
