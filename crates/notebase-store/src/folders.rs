//! Folder hierarchy derived from note paths.
//!
//! Folders are never stored. A folder exists while at least one note lives in
//! it or below it, and disappears with its last note.

use notebase_core::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

/// Snapshot of the folder tree implied by a set of note paths.
///
/// The root folder ([`ROOT_FOLDER`]) is implicit: it is never listed by
/// [`FolderHierarchy::folders`], but [`FolderHierarchy::notes_in`] and
/// [`FolderHierarchy::children`] accept it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderHierarchy {
    /// Direct members of each folder, in the order notes were supplied
    members: BTreeMap<String, Vec<NoteId>>,
    /// Every non-root folder, including ancestors that hold no notes directly
    folders: BTreeSet<String>,
}

impl FolderHierarchy {
    /// Derive the hierarchy from notes (typically in display order)
    pub fn from_notes<'a>(notes: impl IntoIterator<Item = &'a Note>) -> Self {
        Self::from_paths(notes.into_iter().map(|note| (note.id(), note.path())))
    }

    /// Derive the hierarchy from `(id, path)` pairs
    pub fn from_paths<'a>(entries: impl IntoIterator<Item = (NoteId, &'a str)>) -> Self {
        let mut hierarchy = Self::default();
        for (id, path) in entries {
            let folder = NotePath::folder_of(path);
            hierarchy
                .members
                .entry(folder.to_string())
                .or_default()
                .push(id);
            for ancestor in NotePath::ancestors(folder) {
                hierarchy.folders.insert(ancestor.to_string());
            }
        }
        hierarchy
    }

    /// All non-root folders, sorted
    pub fn folders(&self) -> impl Iterator<Item = &str> {
        self.folders.iter().map(String::as_str)
    }

    pub fn contains(&self, folder: &str) -> bool {
        self.folders.contains(NotePath::normalize_folder(folder))
    }

    /// Notes directly inside `folder`
    pub fn notes_in(&self, folder: &str) -> &[NoteId] {
        self.members
            .get(NotePath::normalize_folder(folder))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Immediate subfolders of `folder`, sorted
    pub fn children(&self, folder: &str) -> Vec<&str> {
        let folder = NotePath::normalize_folder(folder);
        self.folders
            .iter()
            .filter(|candidate| NotePath::folder_of(candidate) == folder)
            .map(String::as_str)
            .collect()
    }

    /// Number of notes inside `folder` or any of its subfolders
    pub fn note_count(&self, folder: &str) -> usize {
        let folder = NotePath::normalize_folder(folder);
        self.members
            .iter()
            .filter(|(candidate, _)| {
                folder.is_empty() || NotePath::is_within(candidate, folder)
            })
            .map(|(_, ids)| ids.len())
            .sum()
    }

    /// Number of non-root folders
    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoteStore;

    fn sample() -> (NoteStore, FolderHierarchy) {
        let mut store = NoteStore::new();
        store.create("root note", "", None);
        store.create("plan", "", Some("Work/Projects"));
        store.create("todo", "", Some("Work"));
        store.create("recipe", "", Some("Home"));
        let hierarchy = store.folders();
        (store, hierarchy)
    }

    #[test]
    fn test_folders_include_ancestors() {
        let (_, hierarchy) = sample();
        let folders: Vec<_> = hierarchy.folders().collect();
        assert_eq!(folders, vec!["Home", "Work", "Work/Projects"]);
        assert!(hierarchy.contains("Work"));
        assert!(hierarchy.contains("/Work/Projects/"));
        assert!(!hierarchy.contains(ROOT_FOLDER));
    }

    #[test]
    fn test_notes_in() {
        let (store, hierarchy) = sample();
        let todo = store.find_by_title("todo")[0].id();
        let root = store.find_by_title("root note")[0].id();

        assert_eq!(hierarchy.notes_in("Work"), &[todo]);
        assert_eq!(hierarchy.notes_in(ROOT_FOLDER), &[root]);
        assert!(hierarchy.notes_in("Nowhere").is_empty());
    }

    #[test]
    fn test_children() {
        let (_, hierarchy) = sample();
        assert_eq!(hierarchy.children(ROOT_FOLDER), vec!["Home", "Work"]);
        assert_eq!(hierarchy.children("Work"), vec!["Work/Projects"]);
        assert!(hierarchy.children("Home").is_empty());
    }

    #[test]
    fn test_note_count_is_recursive() {
        let (_, hierarchy) = sample();
        assert_eq!(hierarchy.note_count("Work"), 2);
        assert_eq!(hierarchy.note_count("Work/Projects"), 1);
        assert_eq!(hierarchy.note_count(ROOT_FOLDER), 4);
    }

    #[test]
    fn test_empty_folder_disappears() {
        let (mut store, _) = sample();
        let recipe = store.find_by_title("recipe")[0].id();
        store.delete(recipe).unwrap();

        let hierarchy = store.folders();
        assert!(!hierarchy.contains("Home"));
        assert_eq!(hierarchy.len(), 2);
    }

    #[test]
    fn test_from_paths() {
        let a = NoteId::new();
        let b = NoteId::new();
        let hierarchy = FolderHierarchy::from_paths([(a, "Top"), (b, "Docs/Guides/Intro")]);

        assert_eq!(hierarchy.notes_in(ROOT_FOLDER), &[a]);
        assert_eq!(hierarchy.notes_in("Docs/Guides"), &[b]);
        assert!(hierarchy.contains("Docs"));
        assert!(hierarchy.notes_in("Docs").is_empty());
    }

    #[test]
    fn test_deep_folder_removal_drops_ancestors() {
        let mut store = NoteStore::new();
        let id = store.create("leaf", "", Some("A/B/C")).id();
        assert_eq!(store.folders().len(), 3);

        store.move_note(id, ROOT_FOLDER).unwrap();
        assert!(store.folders().is_empty());
    }
}
