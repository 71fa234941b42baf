//! # Link Graph Analysis
//!
//! Backlink index for notes using petgraph.
//!
//! Provides:
//! - Directed graph of notes and wiki-links
//! - Title-based link resolution (several notes may share a title)
//! - Backlink and forward-link queries
//! - Full edge listing for visualization, dangling targets included
//! - Dangling link reporting
//! - Orphan detection and graph statistics
//!
//! ## Quick Start
//!
//! ```
//! use notebase_graph::LinkGraph;
//!
//! let graph = LinkGraph::new();
//! println!("Nodes: {}", graph.node_count());
//! println!("Edges: {}", graph.edge_count());
//! ```
//!
//! ## Core Concepts
//!
//! - **Nodes**: one per note
//! - **Edges**: note `a` -> note `b` whenever `b.title` is in `a.links`
//! - **Dangling links**: targets no note carries; they are kept as raw
//!   edges for rendering but never produce backlinks
//!
//! The graph is never edited by hand: the note store calls
//! [`LinkGraph::upsert_note`] and [`LinkGraph::remove_note`] on every
//! mutation, and [`LinkGraph::from_notes`] rebuilds it from scratch.

pub mod graph;

pub use graph::{DanglingLink, GraphEdge, GraphNode, GraphStats, LinkGraph};

pub mod prelude {
    pub use crate::graph::{DanglingLink, GraphEdge, GraphNode, GraphStats, LinkGraph};
    pub use notebase_core::prelude::*;
}
