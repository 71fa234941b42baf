//! Thread-safe handle around a [`NoteStore`]

use crate::NoteStore;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared note store behind a single reader-writer lock.
///
/// A write closure holds the lock for the whole mutation, so readers never
/// observe a note whose content, links, tags and versions disagree.
#[derive(Clone, Default)]
pub struct SharedNoteStore {
    inner: Arc<RwLock<NoteStore>>,
}

impl SharedNoteStore {
    pub fn new(store: NoteStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Run a read-only query; concurrent with other readers
    pub fn read<R>(&self, f: impl FnOnce(&NoteStore) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Run a mutation with exclusive access
    pub fn write<R>(&self, f: impl FnOnce(&mut NoteStore) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// Recover the store if this is the last handle
    pub fn try_into_inner(self) -> Result<NoteStore, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notebase_core::prelude::*;
    use notebase_parser::{extract_links, extract_tags};
    use std::thread;

    #[test]
    fn test_read_write() {
        let shared = SharedNoteStore::default();
        let id = shared.write(|store| store.create("A", "[[B]]", None).id());

        let links = shared.read(|store| store.get(id).map(|n| n.links().clone()));
        assert_eq!(links.unwrap().len(), 1);
    }

    #[test]
    fn test_readers_never_see_partial_updates() {
        let shared = SharedNoteStore::default();
        let id = shared.write(|store| store.create("N", "start", None).id());

        let writer = {
            let shared = shared.clone();
            thread::spawn(move || {
                for n in 0..200 {
                    let content = format!("[[L{}]] #t{}", n, n);
                    shared
                        .write(|store| store.update(id, NoteUpdate::new().content(content)))
                        .unwrap();
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..200 {
                        shared.read(|store| {
                            let note = store.get(id).unwrap();
                            assert_eq!(note.links(), &extract_links(note.content()));
                            assert_eq!(note.tags(), &extract_tags(note.content()));
                        });
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }

        let store = shared.try_into_inner().ok().unwrap();
        assert_eq!(store.get(id).unwrap().versions().len(), MAX_VERSIONS);
    }
}
