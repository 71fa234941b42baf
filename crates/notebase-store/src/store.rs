//! Note store: the single owner of the note collection

use crate::folders::FolderHierarchy;
use chrono::Utc;
use notebase_core::prelude::*;
use notebase_core::DEFAULT_CHANGE_SUMMARY;
use notebase_graph::{DanglingLink, GraphEdge, GraphNode, LinkGraph};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::instrument;
use uuid::Uuid;

/// Authoritative note collection.
///
/// Every mutation runs to completion before returning: content changes
/// re-derive `links`/`tags`, record a version and refresh the link graph in
/// the same call. Callers only ever receive shared references to notes.
#[derive(Debug)]
pub struct NoteStore {
    notes: HashMap<NoteId, Note>,
    /// Display order, newest first
    order: Vec<NoteId>,
    link_graph: LinkGraph,
}

impl NoteStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            notes: HashMap::new(),
            order: Vec::new(),
            link_graph: LinkGraph::new(),
        }
    }

    /// Rebuild a store from previously exported notes, kept in the given order.
    ///
    /// Links and tags are re-derived from content rather than trusted.
    pub fn from_notes(notes: Vec<Note>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(notes.len());
        let mut order = Vec::with_capacity(notes.len());
        let mut by_id = HashMap::with_capacity(notes.len());

        for mut note in notes {
            let id = note.id();
            if !seen.insert(id) {
                return Err(Error::duplicate_id(id.to_string()));
            }
            if note.reindex() {
                log::warn!("Note {} carried links/tags inconsistent with its content", id);
            }
            order.push(id);
            by_id.insert(id, note);
        }

        let link_graph = LinkGraph::from_notes(order.iter().filter_map(|id| by_id.get(id)));
        log::info!(
            "Loaded {} notes ({} resolved links)",
            order.len(),
            link_graph.edge_count()
        );

        Ok(Self {
            notes: by_id,
            order,
            link_graph,
        })
    }

    /// Create a note in `folder` (root when `None`), placed first in display order
    #[instrument(skip_all, name = "store_create")]
    pub fn create(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        folder: Option<&str>,
    ) -> &Note {
        let title = title.into();
        let path = NotePath::join(folder.unwrap_or(ROOT_FOLDER), &title);

        let note = Note::new(title, content, path, Utc::now());
        let id = note.id();
        self.link_graph.upsert_note(&note);
        log::info!("Created note {} at '{}'", id, note.path());

        self.notes.insert(id, note);
        self.order.insert(0, id);
        &self.notes[&id]
    }

    /// Apply a partial update.
    ///
    /// A version is recorded only when the content actually changes;
    /// `updated_at` is refreshed on every successful call.
    #[instrument(skip_all, fields(note = %id), name = "store_update")]
    pub fn update(&mut self, id: NoteId, update: NoteUpdate) -> Result<()> {
        let note = self
            .notes
            .get_mut(&id)
            .ok_or_else(|| Error::not_found(id.to_string()))?;
        let now = Utc::now();
        if update.is_empty() {
            log::debug!("Empty update for note {} only refreshes updated_at", id);
        }

        let NoteUpdate {
            title,
            content,
            path,
            change_summary,
        } = update;

        if let Some(content) = content
            && content != note.content()
        {
            let summary = change_summary.as_deref().unwrap_or(DEFAULT_CHANGE_SUMMARY);
            let evicted = note.record_version(summary, now);
            if evicted > 0 {
                log::debug!("Evicted {} old version(s) of note {}", evicted, id);
            }
            note.set_content(content);
            log::debug!(
                "Content of note {} changed: {} links, {} tags",
                id,
                note.links().len(),
                note.tags().len()
            );
        }

        if let Some(title) = title {
            note.set_title(title);
        }
        if let Some(path) = path {
            note.set_path(path);
        }

        note.touch(now);
        self.link_graph.upsert_note(note);
        Ok(())
    }

    /// Remove a note, returning it
    #[instrument(skip_all, fields(note = %id), name = "store_delete")]
    pub fn delete(&mut self, id: NoteId) -> Result<Note> {
        let note = self
            .notes
            .remove(&id)
            .ok_or_else(|| Error::not_found(id.to_string()))?;
        self.order.retain(|other| *other != id);
        self.link_graph.remove_note(id);
        log::info!("Deleted note {} ('{}')", id, note.title());
        Ok(note)
    }

    /// Change the title and the last path segment, keeping the folder
    pub fn rename(&mut self, id: NoteId, new_title: impl Into<String>) -> Result<()> {
        let new_title = new_title.into();
        let path = NotePath::replace_last_segment(self.require(id)?.path(), &new_title);
        log::debug!("Renaming note {} to '{}'", id, new_title);
        self.update(id, NoteUpdate::new().title(new_title).path(path))
    }

    /// Move a note into `folder`; the root folder yields a bare title path
    pub fn move_note(&mut self, id: NoteId, folder: &str) -> Result<()> {
        let path = NotePath::join(folder, self.require(id)?.title());
        log::debug!("Moving note {} to '{}'", id, path);
        self.update(id, NoteUpdate::new().path(path))
    }

    /// Copy a note's content into a new note titled `"<title> (Copy)"` in the same folder
    pub fn duplicate(&mut self, id: NoteId) -> Result<&Note> {
        let source = self.require(id)?;
        let title = format!("{} (Copy)", source.title());
        let content = source.content().to_string();
        let folder = source.folder().to_string();
        Ok(self.create(title, content, Some(&folder)))
    }

    /// Move the note at `source_index` to `target_index` within one folder's
    /// display order. Other folders and the notes themselves are untouched.
    ///
    /// Returns `false` if either index is out of range.
    pub fn reorder(&mut self, folder: &str, source_index: usize, target_index: usize) -> bool {
        let folder = NotePath::normalize_folder(folder);
        let slots: Vec<usize> = self
            .order
            .iter()
            .enumerate()
            .filter(|(_, id)| self.notes.get(id).is_some_and(|n| n.folder() == folder))
            .map(|(slot, _)| slot)
            .collect();

        if source_index >= slots.len() || target_index >= slots.len() {
            log::warn!(
                "Ignoring reorder in '{}': indices {} -> {} out of range ({} notes)",
                folder,
                source_index,
                target_index,
                slots.len()
            );
            return false;
        }

        let mut local: Vec<NoteId> = slots.iter().map(|&slot| self.order[slot]).collect();
        let moved = local.remove(source_index);
        local.insert(target_index, moved);
        for (slot, id) in slots.into_iter().zip(local) {
            self.order[slot] = id;
        }
        true
    }

    /// Delete every note at `folder` or below it. Returns the number removed.
    #[instrument(skip(self), name = "store_delete_folder")]
    pub fn delete_folder(&mut self, folder: &str) -> usize {
        let doomed: Vec<NoteId> = self
            .notes()
            .filter(|n| NotePath::is_within(n.path(), folder))
            .map(|n| n.id())
            .collect();

        for id in &doomed {
            if let Err(e) = self.delete(*id) {
                log::warn!("Cascade delete skipped note {}: {}", id, e);
            }
        }

        log::info!("Deleted folder '{}' ({} notes)", folder, doomed.len());
        doomed.len()
    }

    /// Replace the `old` path prefix with `new` on every note at or below `old`.
    /// Returns the number of notes moved.
    #[instrument(skip(self), name = "store_rename_folder")]
    pub fn rename_folder(&mut self, old: &str, new: &str) -> usize {
        let moves: Vec<(NoteId, String)> = self
            .notes()
            .filter_map(|n| {
                NotePath::replace_prefix(n.path(), old, new)
                    .filter(|path| !path.is_empty())
                    .map(|path| (n.id(), path))
            })
            .collect();

        let mut moved = 0;
        for (id, path) in moves {
            match self.update(id, NoteUpdate::new().path(path)) {
                Ok(()) => moved += 1,
                Err(e) => log::warn!("Folder rename skipped note {}: {}", id, e),
            }
        }

        log::info!("Renamed folder '{}' -> '{}' ({} notes)", old, new, moved);
        moved
    }

    /// Bring back a historic title and content.
    ///
    /// Goes through [`NoteStore::update`], so the state being replaced becomes
    /// the newest version.
    pub fn restore_version(&mut self, id: NoteId, version_id: Uuid) -> Result<()> {
        let note = self.require(id)?;
        let version = note.versions().get(version_id).ok_or_else(|| {
            Error::not_found(format!("version {} of note {}", version_id, id))
        })?;

        let update = NoteUpdate::new()
            .title(version.title())
            .content(version.content())
            .change_summary(format!(
                "Restored version from {}",
                version.timestamp().to_rfc3339()
            ));
        self.update(id, update)
    }

    /// Get a note by id
    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.get(&id)
    }

    /// Get a note by id or fail with `NotFound`
    pub fn require(&self, id: NoteId) -> Result<&Note> {
        self.get(id).ok_or_else(|| Error::not_found(id.to_string()))
    }

    /// All notes in display order
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.order.iter().filter_map(|id| self.notes.get(id))
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Notes carrying exactly `title`
    pub fn find_by_title(&self, title: &str) -> Vec<&Note> {
        self.notes().filter(|n| n.title() == title).collect()
    }

    /// Notes directly inside `folder`, in display order
    pub fn notes_in_folder(&self, folder: &str) -> Vec<&Note> {
        let folder = NotePath::normalize_folder(folder);
        self.notes().filter(|n| n.folder() == folder).collect()
    }

    /// Number of notes carrying each tag
    pub fn tag_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for tag in self.notes.values().flat_map(|n| n.tags()) {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Folder structure derived from the current paths
    pub fn folders(&self) -> FolderHierarchy {
        FolderHierarchy::from_notes(self.notes())
    }

    /// Notes linking to `title`, in display order
    pub fn backlinks_of(&self, title: &str) -> Vec<&Note> {
        let sources = self.link_graph.backlinks(title);
        self.notes().filter(|n| sources.contains(&n.id())).collect()
    }

    /// Every `(source id, target title)` link, dangling ones included
    pub fn graph_edges(&self) -> Vec<GraphEdge> {
        self.link_graph.edges()
    }

    /// `(id, title)` for every note
    pub fn graph_nodes(&self) -> Vec<GraphNode> {
        self.link_graph.nodes()
    }

    /// Links whose target matches no note's title
    pub fn dangling_links(&self) -> Vec<DanglingLink> {
        self.link_graph.dangling_links()
    }

    /// The incrementally maintained link graph
    pub fn link_graph(&self) -> &LinkGraph {
        &self.link_graph
    }
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::new()
    }
}
