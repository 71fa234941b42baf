//! # Notebase
//!
//! Embeddable personal knowledge base engine: notes with wiki-links and tags,
//! backlinks, bounded version history, derived folders and search.
//!
//! This crate re-exports the workspace crates and hosts the `notebase`
//! command-line tool, which works against a JSON snapshot file.
//!
//! ## Quick Start
//!
//! ```
//! use notebase::prelude::*;
//!
//! let mut store = NoteStore::new();
//! let alpha = store.create("Alpha", "Links to [[Beta]] #draft", None).id();
//! store.create("Beta", "no links", None);
//!
//! let backlinks: Vec<_> = store.backlinks_of("Beta").iter().map(|n| n.id()).collect();
//! assert_eq!(backlinks, vec![alpha]);
//!
//! let engine = SearchEngine::new(&store);
//! assert_eq!(engine.search("links").len(), 2);
//! ```
//!
//! ## Crates
//!
//! - [`notebase_core`]: data model, errors, configuration
//! - [`notebase_parser`]: wiki-link and tag extraction
//! - [`notebase_graph`]: link graph and backlinks
//! - [`notebase_store`]: the note store and folder hierarchy
//! - [`notebase_search`]: simple and advanced search
//! - [`notebase_export`]: snapshot, graph and CSV export

pub mod settings;
pub mod snapshot_file;

pub use notebase_core;
pub use notebase_export;
pub use notebase_graph;
pub use notebase_parser;
pub use notebase_search;
pub use notebase_store;

pub use settings::load_config;
pub use snapshot_file::{load_store, save_store};

pub mod prelude {
    pub use notebase_export::{GraphExport, NoteIndexExporter, Snapshot, SnapshotExporter};
    pub use notebase_graph::{GraphStats, LinkGraph};
    pub use notebase_parser::{TextIndexer, extract_links, extract_tags};
    pub use notebase_search::{SearchEngine, SearchHit, SearchQuery};
    pub use notebase_store::prelude::*;
}
