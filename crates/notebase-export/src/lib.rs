//! # Export System
//!
//! Serializes a [`NoteStore`] for persistence collaborators and renderers.
//! The engine does not own storage: these exporters are a pass-through of the
//! store's current state.
//!
//! ## Quick Start
//!
//! ```
//! use notebase_export::SnapshotExporter;
//! use notebase_store::NoteStore;
//!
//! # fn example() -> notebase_core::Result<()> {
//! let mut store = NoteStore::new();
//! store.create("Alpha", "Links to [[Beta]] #draft", None);
//!
//! let json = SnapshotExporter::to_json(&store, true)?;
//! let restored = SnapshotExporter::from_json(&json)?;
//! assert_eq!(restored.len(), 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Export Formats
//!
//! ### Snapshot (JSON)
//! - Every note with its version history, in display order
//! - Timestamps as RFC 3339 strings
//! - `schemaVersion` tag checked on import
//!
//! ### Graph (JSON)
//! - Node list (id, title) and edge list (source id, target title)
//! - Dangling targets included so renderers can draw placeholders
//!
//! ### Note index (CSV)
//! - One row per note: id, title, path, tags, links, last update
//! - Multi-valued columns joined with `|`
//!
//! ### Store statistics (JSON or CSV)
//! - Note, folder and tag counts plus link graph metrics

use chrono::{DateTime, Utc};
use notebase_core::prelude::*;
use notebase_core::{CSVBuilder, to_json_string};
use notebase_graph::{GraphEdge, GraphNode, GraphStats};
use notebase_store::NoteStore;
use serde::{Deserialize, Serialize};

/// Snapshot format version written by this release
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// JSON format
    Json,
    /// CSV format (flattened)
    Csv,
}

/// Serialized store state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub schema_version: u32,
    pub exported_at: DateTime<Utc>,
    /// Notes in display order
    pub notes: Vec<Note>,
}

impl Snapshot {
    /// Capture the current state of `store`
    pub fn capture(store: &NoteStore) -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            notes: store.notes().cloned().collect(),
        }
    }

    /// Rebuild a store, rejecting snapshots written by another schema version
    pub fn into_store(self) -> Result<NoteStore> {
        if self.schema_version != SNAPSHOT_SCHEMA_VERSION {
            return Err(Error::incompatible_snapshot(
                self.schema_version,
                SNAPSHOT_SCHEMA_VERSION,
            ));
        }
        NoteStore::from_notes(self.notes)
    }
}

/// Snapshot exporter
pub struct SnapshotExporter;

impl SnapshotExporter {
    /// Export the store as a JSON snapshot
    pub fn to_json(store: &NoteStore, pretty: bool) -> Result<String> {
        let snapshot = Snapshot::capture(store);
        let json = to_json_string(&snapshot, "snapshot", pretty)?;
        log::info!("Exported snapshot of {} notes", snapshot.notes.len());
        Ok(json)
    }

    /// Parse a JSON snapshot without rebuilding a store
    pub fn parse(json: &str) -> Result<Snapshot> {
        serde_json::from_str(json)
            .map_err(|e| Error::parse_error(format!("Invalid snapshot: {}", e)))
    }

    /// Import a JSON snapshot into a fresh store
    pub fn from_json(json: &str) -> Result<NoteStore> {
        let store = Self::parse(json)?.into_store()?;
        log::info!("Imported snapshot of {} notes", store.len());
        Ok(store)
    }
}

/// Node and edge lists for graph rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphExport {
    pub fn from_store(store: &NoteStore) -> Self {
        Self {
            nodes: store.graph_nodes(),
            edges: store.graph_edges(),
        }
    }

    /// Export as JSON
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        to_json_string(self, "graph", pretty)
    }
}

/// Flat per-note index exporter
pub struct NoteIndexExporter;

impl NoteIndexExporter {
    /// Export one CSV row per note, in display order
    pub fn to_csv(store: &NoteStore) -> Result<String> {
        let csv = store
            .notes()
            .fold(
                CSVBuilder::new(vec!["id", "title", "path", "tags", "links", "updated_at"]),
                |csv, note| {
                    csv.add_row_owned(vec![
                        note.id().to_string(),
                        note.title().to_string(),
                        note.path().to_string(),
                        join_set(note.tags()),
                        join_set(note.links()),
                        note.updated_at().to_rfc3339(),
                    ])
                },
            )
            .build();
        Ok(csv)
    }
}

/// Store statistics for export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreStatsRecord {
    pub timestamp: String,
    pub total_notes: usize,
    pub total_folders: usize,
    pub distinct_tags: usize,
    pub total_versions: usize,
    pub graph: GraphStats,
}

impl StoreStatsRecord {
    pub fn from_store(store: &NoteStore) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            total_notes: store.len(),
            total_folders: store.folders().len(),
            distinct_tags: store.tag_counts().len(),
            total_versions: store.notes().map(|n| n.versions().len()).sum(),
            graph: store.link_graph().stats(),
        }
    }
}

/// Store statistics exporter
pub struct StoreStatsExporter;

impl StoreStatsExporter {
    /// Export stats as JSON
    pub fn to_json(stats: &StoreStatsRecord, pretty: bool) -> Result<String> {
        to_json_string(stats, "store stats", pretty)
    }

    /// Export stats as CSV (single row)
    pub fn to_csv(stats: &StoreStatsRecord) -> Result<String> {
        let csv = format!(
            "timestamp,total_notes,total_folders,distinct_tags,total_versions,resolved_links,dangling_links,orphaned_notes,average_links_per_note\n\
             {},{},{},{},{},{},{},{},{:.3}",
            stats.timestamp,
            stats.total_notes,
            stats.total_folders,
            stats.distinct_tags,
            stats.total_versions,
            stats.graph.resolved_links,
            stats.graph.dangling_links,
            stats.graph.orphaned_notes,
            stats.graph.average_links_per_note
        );

        Ok(csv)
    }

    pub fn export(stats: &StoreStatsRecord, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => Self::to_json(stats, true),
            ExportFormat::Csv => Self::to_csv(stats),
        }
    }
}

fn join_set(values: &std::collections::BTreeSet<String>) -> String {
    values.iter().map(String::as_str).collect::<Vec<_>>().join("|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_store() -> NoteStore {
        let mut store = NoteStore::new();
        let alpha = store
            .create("Alpha", "Links to [[Beta]] #draft", Some("Work"))
            .id();
        store.create("Beta", "no links", None);
        store
            .update(alpha, NoteUpdate::new().content("Now [[Beta]] and [[Gamma]] #draft #v2"))
            .unwrap();
        store
    }

    #[test]
    fn test_snapshot_preserves_notes_and_history() {
        let store = sample_store();
        let json = SnapshotExporter::to_json(&store, true).unwrap();
        let restored = SnapshotExporter::from_json(&json).unwrap();

        let original: Vec<_> = store.notes().collect();
        let reloaded: Vec<_> = restored.notes().collect();
        assert_eq!(original, reloaded);

        let alpha = restored.find_by_title("Alpha")[0];
        assert_eq!(alpha.versions().len(), 1);
        assert_eq!(
            alpha.versions().latest().unwrap().content(),
            "Links to [[Beta]] #draft"
        );
        assert_eq!(restored.backlinks_of("Beta").len(), 1);
    }

    #[test]
    fn test_snapshot_field_names() {
        let store = sample_store();
        let json = SnapshotExporter::to_json(&store, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["schemaVersion"], SNAPSHOT_SCHEMA_VERSION);
        assert!(value["exportedAt"].is_string());
        let first = &value["notes"][0];
        assert!(first["createdAt"].is_string());
        assert!(first["updatedAt"].is_string());
        assert!(first["versions"].is_array());
    }

    #[test]
    fn test_incompatible_schema_version() {
        let store = sample_store();
        let mut snapshot = Snapshot::capture(&store);
        snapshot.schema_version = SNAPSHOT_SCHEMA_VERSION + 1;
        let json = serde_json::to_string(&snapshot).unwrap();

        let err = SnapshotExporter::from_json(&json).unwrap_err();
        assert!(matches!(
            err,
            Error::IncompatibleSnapshot { found: 2, expected: 1 }
        ));
    }

    #[test]
    fn test_malformed_snapshot() {
        let err = SnapshotExporter::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::ParseError { .. }));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let store = sample_store();
        let mut snapshot = Snapshot::capture(&store);
        let first = snapshot.notes[0].clone();
        snapshot.notes.push(first);

        let err = snapshot.into_store().unwrap_err();
        assert!(matches!(err, Error::DuplicateId { .. }));
    }

    #[test]
    fn test_import_rederives_links() {
        let store = sample_store();
        let mut value: serde_json::Value =
            serde_json::from_str(&SnapshotExporter::to_json(&store, false).unwrap()).unwrap();
        value["notes"][0]["links"] = serde_json::json!(["Bogus"]);

        let restored = SnapshotExporter::from_json(&value.to_string()).unwrap();
        assert!(restored.backlinks_of("Bogus").is_empty());
        let alpha = restored.find_by_title("Alpha")[0];
        assert!(alpha.links_to("Gamma"));
        assert!(!alpha.links_to("Bogus"));
    }

    #[test]
    fn test_snapshot_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        let store = sample_store();

        fs::write(&path, SnapshotExporter::to_json(&store, true).unwrap()).unwrap();
        let restored = SnapshotExporter::from_json(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(restored.len(), store.len());
    }

    #[test]
    fn test_graph_export() {
        let store = sample_store();
        let export = GraphExport::from_store(&store);

        assert_eq!(export.nodes.len(), 2);
        let targets: Vec<_> = export.edges.iter().map(|e| e.target.as_str()).collect();
        assert!(targets.contains(&"Beta"));
        assert!(targets.contains(&"Gamma"));

        let json = export.to_json(false).unwrap();
        assert!(json.contains("\"edges\""));
    }

    #[test]
    fn test_note_index_csv() {
        let store = sample_store();
        let csv = NoteIndexExporter::to_csv(&store).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines[0], "id,title,path,tags,links,updated_at");
        assert_eq!(lines.len(), 3);
        let alpha = lines.iter().find(|l| l.contains("Alpha")).unwrap();
        assert!(alpha.contains("Work/Alpha"));
        assert!(alpha.contains("draft|v2"));
        assert!(alpha.contains("Beta|Gamma"));
    }

    #[test]
    fn test_store_stats() {
        let store = sample_store();
        let stats = StoreStatsRecord::from_store(&store);

        assert_eq!(stats.total_notes, 2);
        assert_eq!(stats.total_folders, 1);
        assert_eq!(stats.distinct_tags, 2);
        assert_eq!(stats.total_versions, 1);
        assert_eq!(stats.graph.resolved_links, 1);
        assert_eq!(stats.graph.dangling_links, 1);

        let csv = StoreStatsExporter::export(&stats, ExportFormat::Csv).unwrap();
        assert!(csv.starts_with("timestamp,total_notes"));
        let json = StoreStatsExporter::export(&stats, ExportFormat::Json).unwrap();
        assert!(json.contains("\"total_notes\": 2"));
    }
}
