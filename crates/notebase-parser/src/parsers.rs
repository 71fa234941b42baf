//! Raw extraction passes over note text.
//!
//! Each parser returns matches in document order with duplicates kept; the
//! crate-level functions collapse them into sets.

mod tags;
mod wikilinks;

pub use self::tags::parse_tags;
pub use self::wikilinks::parse_wikilinks;
