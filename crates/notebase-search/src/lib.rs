//! # Note Search
//!
//! Linear-scan search over a [`NoteStore`](notebase_store::NoteStore).
//!
//! Two entry points:
//! - [`SearchEngine::search`]: case-insensitive substring over title and/or
//!   content, as selected by [`SimpleSearchFields`](notebase_core::SimpleSearchFields)
//! - [`SearchEngine::advanced_search`]: a text predicate restricted to a
//!   [`ContentScope`](notebase_core::ContentScope), AND'd with date, tag and
//!   folder filters (tags and folders are each OR'd internally)
//!
//! ## Quick Start
//!
//! ```
//! use notebase_search::prelude::*;
//!
//! let mut store = NoteStore::new();
//! store.create("Groceries", "milk #home", Some("Home"));
//! store.create("Standup", "blockers #work", Some("Work"));
//!
//! let engine = SearchEngine::new(&store);
//! assert_eq!(engine.search("MILK").len(), 1);
//!
//! let filter = SearchFilter::new().with_tag("work").with_tag("home");
//! assert_eq!(engine.advanced_search(&filter, None).len(), 2);
//! ```
//!
//! Results are references into the store, listed in display order.

pub mod engine;

pub use engine::{SearchEngine, SearchHit, SearchQuery};

pub mod prelude {
    pub use crate::engine::{SearchEngine, SearchHit, SearchQuery};
    pub use notebase_store::prelude::*;
}
