//! Shared utilities for operations across notebase crates.
//!
//! Provides helpers for:
//! - Serialization with consistent error handling
//! - CSV building
//! - Slash-delimited note path manipulation

use crate::{Error, Result};

/// The folder of a note stored at the top level.
pub const ROOT_FOLDER: &str = "";

/// Generic JSON serialization with consistent error handling
/// Works with any type that implements Serialize (including slices)
pub fn to_json_string<T: serde::Serialize + ?Sized>(
    data: &T,
    context: &str,
    pretty: bool,
) -> Result<String> {
    let result = if pretty {
        serde_json::to_string_pretty(data)
    } else {
        serde_json::to_string(data)
    };
    result.map_err(|e| Error::parse_error(format!("Failed to serialize {} as JSON: {}", context, e)))
}

/// Generic CSV serialization builder
/// Use the CSVBuilder fluent API to construct and export CSV data
pub struct CSVBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CSVBuilder {
    /// Create a new CSV with headers
    pub fn new(headers: Vec<&str>) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row of data from owned strings
    pub fn add_row_owned(mut self, values: Vec<String>) -> Self {
        self.rows.push(values);
        self
    }

    /// Build the CSV string; fields containing separators or quotes are quoted
    pub fn build(self) -> String {
        let mut csv = Self::join(&self.headers) + "\n";
        for row in &self.rows {
            csv.push_str(&Self::join(row));
            csv.push('\n');
        }
        csv
    }

    fn join(fields: &[String]) -> String {
        fields
            .iter()
            .map(|f| Self::escape(f))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn escape(field: &str) -> String {
        if field.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}

/// Helpers for slash-delimited logical note paths (`"Folder/Sub/Title"`).
///
/// Paths are plain strings; a folder is a path with its last segment removed
/// and the empty string is the root folder.
pub struct NotePath;

impl NotePath {
    /// Normalize a folder argument: surrounding slashes are dropped, `"/"` is the root.
    pub fn normalize_folder(folder: &str) -> &str {
        folder.trim_matches('/')
    }

    /// Folder of a note path (everything before the last `/`).
    pub fn folder_of(path: &str) -> &str {
        match path.rfind('/') {
            Some(idx) => &path[..idx],
            None => ROOT_FOLDER,
        }
    }

    /// Last segment of a note path.
    pub fn last_segment(path: &str) -> &str {
        match path.rfind('/') {
            Some(idx) => &path[idx + 1..],
            None => path,
        }
    }

    /// Join a folder and a title; the root folder yields the bare title.
    pub fn join(folder: &str, title: &str) -> String {
        let folder = Self::normalize_folder(folder);
        if folder.is_empty() {
            title.to_string()
        } else {
            format!("{}/{}", folder, title)
        }
    }

    /// Replace only the last segment, keeping the folder prefix.
    pub fn replace_last_segment(path: &str, segment: &str) -> String {
        Self::join(Self::folder_of(path), segment)
    }

    /// True if `path` equals `prefix` or lies underneath it.
    pub fn is_within(path: &str, prefix: &str) -> bool {
        let prefix = Self::normalize_folder(prefix);
        if prefix.is_empty() {
            return false;
        }
        path == prefix
            || (path.len() > prefix.len()
                && path.starts_with(prefix)
                && path.as_bytes()[prefix.len()] == b'/')
    }

    /// Replace a leading `old` prefix with `new`, keeping the remainder.
    /// Returns `None` when `path` is not within `old`.
    pub fn replace_prefix(path: &str, old: &str, new: &str) -> Option<String> {
        if !Self::is_within(path, old) {
            return None;
        }
        let old = Self::normalize_folder(old);
        let rest = &path[old.len()..];
        let new = Self::normalize_folder(new);
        if new.is_empty() {
            // moving to the root drops the separator
            let rest = rest.trim_start_matches('/');
            Some(rest.to_string())
        } else {
            Some(format!("{}{}", new, rest))
        }
    }

    /// All ancestor folders of a folder, closest first, excluding the root.
    pub fn ancestors(folder: &str) -> Vec<&str> {
        let mut out = Vec::new();
        let mut current = Self::normalize_folder(folder);
        while !current.is_empty() {
            out.push(current);
            current = Self::folder_of(current);
        }
        out
    }
}
