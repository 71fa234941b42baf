//! Tag parser: `#tag`, `#multi-word_tag`, `#2024`
//!
//! A tag is `#` followed by one or more word characters (letters, digits,
//! `-`, `_`). A `#` that directly follows a word character is part of that
//! word, not a tag.

use regex::Regex;
use std::sync::LazyLock;

/// Matches #tag; the preceding character is checked separately
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([\w-]+)").expect("valid tag pattern"));

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

/// Parse all tags in document order (duplicates kept, case preserved).
pub fn parse_tags(content: &str) -> Vec<String> {
    if !content.contains('#') {
        return Vec::new();
    }

    TAG_PATTERN
        .captures_iter(content)
        .filter_map(|caps| {
            let full_match = caps.get(0)?;
            let preceded_by_word = content[..full_match.start()]
                .chars()
                .next_back()
                .is_some_and(is_word_char);
            if preceded_by_word {
                return None;
            }
            Some(caps.get(1)?.as_str().to_string())
        })
        .collect()
}
