//! # Note Store
//!
//! The authoritative owner of the note collection.
//!
//! All mutations pass through [`NoteStore`], which:
//! - runs the text indexer so `links`/`tags` always match `content`
//! - records a bounded version history when content changes
//! - keeps the link graph in step for backlink and graph queries
//! - derives folders from note paths on demand ([`FolderHierarchy`])
//!
//! ## Quick Start
//!
//! ```
//! use notebase_store::prelude::*;
//!
//! let mut store = NoteStore::new();
//! let alpha = store.create("Alpha", "Links to [[Beta]] #draft", None).id();
//! store.create("Beta", "no links", None);
//!
//! let backlinks: Vec<_> = store.backlinks_of("Beta").iter().map(|n| n.id()).collect();
//! assert_eq!(backlinks, vec![alpha]);
//! assert!(store.backlinks_of("Alpha").is_empty());
//!
//! store.update(alpha, NoteUpdate::new().content("Rewritten")).unwrap();
//! assert_eq!(store.get(alpha).unwrap().versions().len(), 1);
//! ```
//!
//! ## Thread Safety
//!
//! [`NoteStore`] itself is a plain single-writer structure. Hosts sharing it
//! between threads wrap it in [`SharedNoteStore`]: one writer at a time,
//! readers concurrent with each other but never with a writer.
//!
//! ## Error Handling
//!
//! Operations naming an unknown note id fail with
//! [`Error::NotFound`](notebase_core::Error::NotFound) before touching any state.

pub mod folders;
pub mod shared;
pub mod store;

pub use folders::FolderHierarchy;
pub use notebase_core::prelude::*;
pub use shared::SharedNoteStore;
pub use store::NoteStore;

pub mod prelude {
    pub use crate::folders::FolderHierarchy;
    pub use crate::shared::SharedNoteStore;
    pub use crate::store::NoteStore;
    pub use notebase_core::prelude::*;
    pub use notebase_graph::{DanglingLink, GraphEdge, GraphNode};
}
