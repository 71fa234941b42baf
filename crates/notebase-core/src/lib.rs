//! # Notebase Core
//!
//! Core data models, error types, and configuration for the knowledge base engine.
//! This crate defines the canonical types that all other crates depend on.
//!
//! ## Architecture Principles
//!
//! - **Type-Driven Design**: Strong types replace string-based APIs
//! - **Zero Panic in Libraries**: All errors are `Result<T, Error>`
//! - **Builder Pattern for Complex Types**: Configuration and filters use builders
//! - **Derived State Is Never Set Directly**: `links`/`tags` only change together with `content`
//!
//! ## Core Modules
//!
//! - [`models`] - Notes, ids, partial updates and search filters
//! - [`history`] - Bounded per-note version history
//! - [`error`] - Error taxonomy and Result alias
//! - [`config`] - Engine configuration
//! - [`utils`] - Path helpers and serialization utilities
//!
//! ## Usage Examples
//!
//! ```
//! use notebase_core::prelude::*;
//!
//! let filter = SearchFilter::new()
//!     .with_tag("draft")
//!     .with_date_range(DateRange::Last7Days);
//! assert!(!filter.is_default());
//!
//! assert_eq!(NotePath::folder_of("Work/Projects/Plan"), "Work/Projects");
//! ```
//!
//! ### Error Handling
//!
//! ```
//! use notebase_core::prelude::*;
//!
//! fn lookup() -> Result<()> {
//!     Err(Error::not_found("3f1c..."))
//! }
//! assert!(lookup().unwrap_err().is_not_found());
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod utils;

pub use config::{EngineConfig, EngineConfigBuilder};
pub use error::{Error, Result};
pub use history::{DEFAULT_CHANGE_SUMMARY, MAX_VERSIONS, Version, VersionHistory};
pub use models::*;
pub use utils::{CSVBuilder, NotePath, ROOT_FOLDER, to_json_string};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::error::{Error, Result};
    pub use crate::history::{MAX_VERSIONS, Version, VersionHistory};
    pub use crate::models::{
        ContentScope, DateRange, Note, NoteId, NoteUpdate, SearchFilter, SimpleSearchFields,
    };
    pub use crate::utils::{NotePath, ROOT_FOLDER};
}
