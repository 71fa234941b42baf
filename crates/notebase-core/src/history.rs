//! Bounded per-note version history.
//!
//! Every note keeps at most [`MAX_VERSIONS`] snapshots of its previous states,
//! newest first. The cap is structural: the underlying deque is private and
//! [`VersionHistory::record`] is the only way to add an entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// Hard cap on retained versions per note.
pub const MAX_VERSIONS: usize = 10;

/// Summary used when a caller supplies none.
pub const DEFAULT_CHANGE_SUMMARY: &str = "Content updated";

/// Immutable snapshot of a note's previous title and content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    id: Uuid,
    title: String,
    content: String,
    /// When this state was superseded
    timestamp: DateTime<Utc>,
    change_summary: String,
}

impl Version {
    /// Build a snapshot of a superseded state.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
        change_summary: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            timestamp,
            change_summary: change_summary.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn change_summary(&self) -> &str {
        &self.change_summary
    }
}

/// Fixed-capacity, newest-first log of [`Version`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Version>", into = "Vec<Version>")]
pub struct VersionHistory {
    entries: VecDeque<Version>,
}

impl VersionHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MAX_VERSIONS),
        }
    }

    /// Prepend a version, evicting the oldest entries beyond the cap.
    ///
    /// Returns the number of evicted versions.
    pub fn record(&mut self, version: Version) -> usize {
        self.entries.push_front(version);
        let evicted = self.entries.len().saturating_sub(MAX_VERSIONS);
        self.entries.truncate(MAX_VERSIONS);
        evicted
    }

    /// Versions, newest first
    pub fn iter(&self) -> impl Iterator<Item = &Version> {
        self.entries.iter()
    }

    /// Most recent prior state
    pub fn latest(&self) -> Option<&Version> {
        self.entries.front()
    }

    /// Look up a version by id
    pub fn get(&self, id: Uuid) -> Option<&Version> {
        self.entries.iter().find(|v| v.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<Version>> for VersionHistory {
    fn from(mut versions: Vec<Version>) -> Self {
        if versions.len() > MAX_VERSIONS {
            log::warn!(
                "Truncating version history of {} entries to {}",
                versions.len(),
                MAX_VERSIONS
            );
            versions.truncate(MAX_VERSIONS);
        }
        Self {
            entries: versions.into(),
        }
    }
}

impl From<VersionHistory> for Vec<Version> {
    fn from(history: VersionHistory) -> Self {
        history.entries.into()
    }
}
