//! # Notebase Parser
//!
//! The text indexer: derives wiki-link targets and tags from raw note content.
//!
//! Markup is otherwise opaque; only two constructs are recognised:
//!
//! - Wikilinks: `[[Target]]`, the trimmed inner text is the target title
//! - Tags: `#tag` made of letters, digits, `-` and `_`, not glued to a preceding word
//!
//! Both extractions are pure functions of the content. Results are
//! `BTreeSet`s, so iteration order is stable and duplicates collapse.
//!
//! ## Quick Start
//!
//! ```
//! use notebase_parser::{extract_links, extract_tags};
//!
//! let links = extract_links("See [[Foo]] and [[Bar]]");
//! assert!(links.contains("Foo") && links.contains("Bar"));
//!
//! let tags = extract_tags("note #alpha and #beta-2");
//! assert_eq!(tags.into_iter().collect::<Vec<_>>(), vec!["alpha", "beta-2"]);
//!
//! assert!(extract_links("[[Foo").is_empty());
//! ```

pub mod parsers;

use std::collections::BTreeSet;

pub use parsers::{parse_tags, parse_wikilinks};

/// Set of wiki-link targets referenced by `content`.
pub fn extract_links(content: &str) -> BTreeSet<String> {
    parse_wikilinks(content).into_iter().collect()
}

/// Set of tags referenced by `content`.
pub fn extract_tags(content: &str) -> BTreeSet<String> {
    parse_tags(content).into_iter().collect()
}

/// Links and tags derived from one piece of content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexedContent {
    pub links: BTreeSet<String>,
    pub tags: BTreeSet<String>,
}

/// Runs both extraction passes over one piece of content.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextIndexer;

impl TextIndexer {
    pub fn new() -> Self {
        Self
    }

    /// Extract links and tags from `content`
    pub fn index(&self, content: &str) -> IndexedContent {
        IndexedContent {
            links: extract_links(content),
            tags: extract_tags(content),
        }
    }
}

/// Convenient prelude for common imports.
pub mod prelude {
    pub use crate::{
        IndexedContent, TextIndexer, extract_links, extract_tags, parse_tags, parse_wikilinks,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_links() {
        assert_eq!(
            extract_links("See [[Foo]] and [[Bar]]"),
            set(&["Foo", "Bar"])
        );
        assert_eq!(extract_links("[[Foo]] [[Foo]] [[ Foo ]]"), set(&["Foo"]));
        assert!(extract_links("[[Foo").is_empty());
    }

    #[test]
    fn test_extract_tags() {
        assert_eq!(
            extract_tags("note #alpha and #beta-2"),
            set(&["alpha", "beta-2"])
        );
        assert_eq!(extract_tags("price is #1 item"), set(&["1"]));
        assert_eq!(extract_tags("#a #a #b"), set(&["a", "b"]));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let content = "#zeta [[Z]] #alpha [[A]] #mid [[M]]";
        let first: Vec<_> = extract_tags(content).into_iter().collect();
        let second: Vec<_> = extract_tags(content).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_index() {
        let indexed = TextIndexer::new().index("Links to [[Beta]] #draft\nand [[Multi\nLine]]");
        assert_eq!(indexed.links, set(&["Beta", "Multi\nLine"]));
        assert_eq!(indexed.tags, set(&["draft"]));

        assert_eq!(TextIndexer::new().index("nothing"), IndexedContent::default());
    }
}
