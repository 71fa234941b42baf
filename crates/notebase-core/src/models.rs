//! Core data models of the knowledge base.
//!
//! These types are designed to be:
//! - **Serializable**: All types derive Serialize/Deserialize
//! - **Debuggable**: Derive Debug for easy inspection
//! - **Type-Safe**: Enums replace magic strings
//!
//! A [`Note`] derives its `links`/`tags` from `content` itself, through the
//! text indexer. No method accepts those sets from the outside, so they are a
//! function of `content` for every caller.

use crate::history::{Version, VersionHistory};
use crate::utils::NotePath;
use chrono::{DateTime, Duration, Utc};
use notebase_parser::{IndexedContent, TextIndexer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque, immutable note identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Generate a fresh id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for NoteId {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| crate::Error::parse_error(format!("Invalid note id '{}': {}", s, e)))
    }
}

impl From<Uuid> for NoteId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// A titled, tagged, linkable unit of text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    id: NoteId,
    title: String,
    content: String,
    path: String,
    links: BTreeSet<String>,
    tags: BTreeSet<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    versions: VersionHistory,
}

impl Note {
    /// Create a note with freshly derived links and tags.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        path: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let content = content.into();
        let IndexedContent { links, tags } = TextIndexer::new().index(&content);
        Self {
            id: NoteId::new(),
            title: title.into(),
            content,
            path: path.into(),
            links,
            tags,
            created_at: now,
            updated_at: now,
            versions: VersionHistory::new(),
        }
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Wiki-link targets referenced by the content
    pub fn links(&self) -> &BTreeSet<String> {
        &self.links
    }

    /// Tags referenced by the content
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Prior states, newest first
    pub fn versions(&self) -> &VersionHistory {
        &self.versions
    }

    /// Folder derived from the path (empty for the root folder)
    pub fn folder(&self) -> &str {
        NotePath::folder_of(&self.path)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn links_to(&self, title: &str) -> bool {
        self.links.contains(title)
    }

    /// Replace content and re-derive links and tags from it.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.reindex();
    }

    /// Re-derive links and tags from the current content.
    ///
    /// Returns `true` if the stored sets disagreed with the content, which
    /// only happens for notes deserialized from stale data.
    pub fn reindex(&mut self) -> bool {
        let IndexedContent { links, tags } = TextIndexer::new().index(&self.content);
        let stale = links != self.links || tags != self.tags;
        self.links = links;
        self.tags = tags;
        stale
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    /// Refresh `updated_at`
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    /// Snapshot the current title/content into the history.
    ///
    /// Returns the number of evicted versions.
    pub fn record_version(&mut self, summary: &str, now: DateTime<Utc>) -> usize {
        let version = Version::new(self.title.clone(), self.content.clone(), now, summary);
        self.versions.record(version)
    }
}

/// Partial update of a note; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub path: Option<String>,
    /// Overrides the generic summary of the version recorded on content change
    pub change_summary: Option<String>,
}

impl NoteUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn change_summary(mut self, summary: impl Into<String>) -> Self {
        self.change_summary = Some(summary.into());
        self
    }

    /// True if no field is set
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.path.is_none()
    }
}

/// Field a text query is evaluated against in advanced search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentScope {
    /// Title, content and path
    #[default]
    All,
    Title,
    Content,
    Path,
}

impl FromStr for ContentScope {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "title" => Ok(Self::Title),
            "content" => Ok(Self::Content),
            "path" => Ok(Self::Path),
            other => Err(crate::Error::parse_error(format!(
                "Unknown content scope '{}'",
                other
            ))),
        }
    }
}

/// Fields matched by simple search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimpleSearchFields {
    #[default]
    TitleAndContent,
    Title,
    Content,
}

/// Recency bucket on `updated_at`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    #[default]
    All,
    Last7Days,
    Last30Days,
    Last90Days,
}

impl DateRange {
    /// Width of the bucket, `None` for [`DateRange::All`]
    pub fn window(&self) -> Option<Duration> {
        match self {
            DateRange::All => None,
            DateRange::Last7Days => Some(Duration::days(7)),
            DateRange::Last30Days => Some(Duration::days(30)),
            DateRange::Last90Days => Some(Duration::days(90)),
        }
    }

    /// True if `timestamp` falls inside the bucket ending at `now`
    pub fn admits(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self.window() {
            None => true,
            Some(window) => now.signed_duration_since(timestamp) <= window,
        }
    }
}

impl FromStr for DateRange {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "7d" | "last7days" => Ok(Self::Last7Days),
            "30d" | "last30days" => Ok(Self::Last30Days),
            "90d" | "last90days" => Ok(Self::Last90Days),
            other => Err(crate::Error::parse_error(format!(
                "Unknown date range '{}'",
                other
            ))),
        }
    }
}

/// Query descriptor for advanced search.
///
/// Tags and folders are OR'd within their dimension; all active dimensions
/// are AND'd together with the text predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
    #[serde(default)]
    pub scope: ContentScope,
    #[serde(default)]
    pub date_range: DateRange,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub folders: BTreeSet<String>,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scope(mut self, scope: ContentScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        let folder = folder.into();
        self.folders
            .insert(NotePath::normalize_folder(&folder).to_string());
        self
    }

    /// True when every dimension is at its default
    pub fn is_default(&self) -> bool {
        self.scope == ContentScope::All
            && self.date_range == DateRange::All
            && self.tags.is_empty()
            && self.folders.is_empty()
    }

    /// True if a date, tag or folder predicate narrows the corpus.
    ///
    /// The scope alone narrows nothing: it only selects the field a text query
    /// is matched against.
    pub fn has_active_predicates(&self) -> bool {
        self.date_range != DateRange::All || !self.tags.is_empty() || !self.folders.is_empty()
    }
}
