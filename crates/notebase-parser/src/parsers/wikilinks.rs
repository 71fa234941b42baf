//! Wikilink parser: `[[Target]]`
//!
//! The enclosed text, trimmed, is the target title. Each opener pairs with the
//! first closing marker after it, line breaks included; an opener with no
//! closing marker produces nothing.

use regex::Regex;
use std::sync::LazyLock;

/// Matches [[...]] lazily; `.` also matches newlines
static WIKILINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[\[(.*?)\]\]").expect("valid wikilink pattern"));

/// Parse all wikilink targets in document order (duplicates kept).
pub fn parse_wikilinks(content: &str) -> Vec<String> {
    if !content.contains("[[") {
        return Vec::new();
    }

    WIKILINK_PATTERN
        .captures_iter(content)
        .filter_map(|caps| {
            let target = caps.get(1)?.as_str().trim();
            if target.is_empty() {
                None
            } else {
                Some(target.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_wikilink() {
        assert_eq!(parse_wikilinks("See [[Note]]"), vec!["Note"]);
    }

    #[test]
    fn test_wikilink_with_folder() {
        assert_eq!(parse_wikilinks("See [[folder/Note]]"), vec!["folder/Note"]);
    }

    #[test]
    fn test_multiple_wikilinks_in_order() {
        let links = parse_wikilinks("[[Note1]] and [[Note2]] and [[Note1]]");
        assert_eq!(links, vec!["Note1", "Note2", "Note1"]);
    }

    #[test]
    fn test_target_is_trimmed() {
        assert_eq!(parse_wikilinks("[[  Spaced Out  ]]"), vec!["Spaced Out"]);
    }

    #[test]
    fn test_empty_target_skipped() {
        assert!(parse_wikilinks("[[]] and [[   ]]").is_empty());
    }

    #[test]
    fn test_unterminated() {
        assert!(parse_wikilinks("[[Foo").is_empty());
        assert!(parse_wikilinks("[[Foo]").is_empty());
    }

    #[test]
    fn test_first_closing_marker_wins() {
        assert_eq!(parse_wikilinks("[[A]] B]]"), vec!["A"]);
        assert_eq!(parse_wikilinks("[[A [[B]]"), vec!["A [[B"]);
    }

    #[test]
    fn test_spans_lines() {
        assert_eq!(
            parse_wikilinks("See [[Project\nPlan]] here and [[Ok]]"),
            vec!["Project\nPlan", "Ok"]
        );
        assert!(parse_wikilinks("[[Open\nnever closed").is_empty());
    }

    #[test]
    fn test_embed_syntax_counts_as_link() {
        assert_eq!(parse_wikilinks("![[Diagram]]"), vec!["Diagram"]);
    }
}
