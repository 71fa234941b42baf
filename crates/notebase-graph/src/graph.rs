//! Link graph using petgraph for note relationship analysis

use notebase_core::prelude::*;
use petgraph::Direction::{Incoming, Outgoing};
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Graph node: one note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NoteId,
    pub title: String,
}

/// Directed edge from a note to a link target title (resolved or not)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: NoteId,
    pub target: String,
}

/// Link whose target title matches no note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DanglingLink {
    pub source: NoteId,
    pub target: String,
}

/// Link graph for analyzing note relationships.
///
/// Nodes are notes; an edge `a -> b` exists for every note `b` whose title is
/// in `a.links`. The raw `links` sets are kept alongside so edges towards
/// titles that no note carries yet are still reported by [`LinkGraph::edges`].
#[derive(Debug)]
pub struct LinkGraph {
    /// Directed graph: nodes are notes, edges are resolved links
    graph: StableDiGraph<GraphNode, ()>,

    /// Map from note id to node index
    id_index: HashMap<NoteId, NodeIndex>,

    /// Map from title to every node carrying it
    title_index: HashMap<String, BTreeSet<NodeIndex>>,

    /// Forward link sets by source note, as stored on the notes
    forward: BTreeMap<NoteId, BTreeSet<String>>,
}

impl LinkGraph {
    /// Create a new link graph
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::new(),
            id_index: HashMap::new(),
            title_index: HashMap::new(),
            forward: BTreeMap::new(),
        }
    }

    /// Build a graph from a full note collection
    pub fn from_notes<'a>(notes: impl IntoIterator<Item = &'a Note>) -> Self {
        let mut graph = Self::new();
        let notes: Vec<&Note> = notes.into_iter().collect();

        for note in &notes {
            let idx = graph.graph.add_node(GraphNode {
                id: note.id(),
                title: note.title().to_string(),
            });
            graph.id_index.insert(note.id(), idx);
            graph.index_title(note.title(), idx);
            graph.forward.insert(note.id(), note.links().clone());
        }

        for note in &notes {
            if let Some(&source) = graph.id_index.get(&note.id()) {
                graph.add_outgoing(source, note.links());
            }
        }

        graph
    }

    /// Insert a note or refresh it after any change to its title or links
    pub fn upsert_note(&mut self, note: &Note) {
        let id = note.id();
        let title = note.title();

        let idx = match self.id_index.get(&id) {
            Some(&idx) => {
                let old_title = self.graph[idx].title.clone();
                if old_title != title {
                    self.unindex_title(&old_title, idx);
                    self.graph[idx].title = title.to_string();
                    self.index_title(title, idx);
                }
                idx
            }
            None => {
                let idx = self.graph.add_node(GraphNode {
                    id,
                    title: title.to_string(),
                });
                self.id_index.insert(id, idx);
                self.index_title(title, idx);
                idx
            }
        };

        self.forward.insert(id, note.links().clone());

        // Drop every incident edge and re-derive both directions
        let incident: BTreeSet<_> = self
            .graph
            .edges_directed(idx, Outgoing)
            .chain(self.graph.edges_directed(idx, Incoming))
            .map(|e| e.id())
            .collect();
        for edge in incident {
            self.graph.remove_edge(edge);
        }

        self.add_outgoing(idx, note.links());

        let sources: Vec<NodeIndex> = self
            .forward
            .iter()
            .filter(|(source, links)| **source != id && links.contains(title))
            .filter_map(|(source, _)| self.id_index.get(source).copied())
            .collect();
        for source in sources {
            self.graph.add_edge(source, idx, ());
        }

        for target in note.links() {
            if !self.title_index.contains_key(target) {
                log::debug!("Unresolved link from {}: [[{}]]", id, target);
            }
        }
    }

    /// Remove a note and every edge touching it
    pub fn remove_note(&mut self, id: NoteId) -> bool {
        let Some(idx) = self.id_index.remove(&id) else {
            return false;
        };
        self.forward.remove(&id);
        if let Some(node) = self.graph.remove_node(idx) {
            self.unindex_title(&node.title, idx);
        }
        true
    }

    /// Notes whose links contain `title`.
    ///
    /// A title that no note carries has no backlinks, whatever links to it.
    pub fn backlinks(&self, title: &str) -> BTreeSet<NoteId> {
        let Some(targets) = self.title_index.get(title) else {
            return BTreeSet::new();
        };

        targets
            .iter()
            .flat_map(|&idx| self.graph.neighbors_directed(idx, Incoming))
            .map(|idx| self.graph[idx].id)
            .collect()
    }

    /// Notes a note links to (resolved targets only)
    pub fn forward_links(&self, id: NoteId) -> BTreeSet<NoteId> {
        match self.id_index.get(&id) {
            Some(&idx) => self
                .graph
                .neighbors_directed(idx, Outgoing)
                .map(|target| self.graph[target].id)
                .collect(),
            None => BTreeSet::new(),
        }
    }

    /// Ids of notes carrying `title`
    pub fn resolve(&self, title: &str) -> BTreeSet<NoteId> {
        self.title_index
            .get(title)
            .map(|nodes| nodes.iter().map(|&idx| self.graph[idx].id).collect())
            .unwrap_or_default()
    }

    /// All nodes, ordered by note id
    pub fn nodes(&self) -> Vec<GraphNode> {
        self.forward
            .keys()
            .filter_map(|id| self.id_index.get(id))
            .map(|&idx| self.graph[idx].clone())
            .collect()
    }

    /// Every `(source, target title)` pair, dangling ones included.
    ///
    /// Ordered by source id then target title.
    pub fn edges(&self) -> Vec<GraphEdge> {
        self.forward
            .iter()
            .flat_map(|(source, links)| {
                links.iter().map(move |target| GraphEdge {
                    source: *source,
                    target: target.clone(),
                })
            })
            .collect()
    }

    /// Resolved `(source, target)` note pairs, sorted
    pub fn resolved_edges(&self) -> Vec<(NoteId, NoteId)> {
        let mut edges: Vec<_> = IntoEdgeReferences::edge_references(&self.graph)
            .map(|e| (self.graph[e.source()].id, self.graph[e.target()].id))
            .collect();
        edges.sort();
        edges
    }

    /// Links whose target title matches no note
    pub fn dangling_links(&self) -> Vec<DanglingLink> {
        self.forward
            .iter()
            .flat_map(|(source, links)| {
                links
                    .iter()
                    .filter(|target| !self.title_index.contains_key(*target))
                    .map(move |target| DanglingLink {
                        source: *source,
                        target: target.clone(),
                    })
            })
            .collect()
    }

    /// Notes with no resolved links in or out
    pub fn orphaned_notes(&self) -> Vec<NoteId> {
        self.forward
            .keys()
            .filter_map(|id| self.id_index.get(id).map(|&idx| (*id, idx)))
            .filter(|&(_, idx)| {
                self.graph.edges_directed(idx, Incoming).next().is_none()
                    && self.graph.edges_directed(idx, Outgoing).next().is_none()
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// Get statistics about the graph
    pub fn stats(&self) -> GraphStats {
        let node_count = self.graph.node_count();
        let edge_count = self.graph.edge_count();

        let average_links_per_note = if node_count > 0 {
            edge_count as f64 / node_count as f64
        } else {
            0.0
        };

        GraphStats {
            total_notes: node_count,
            resolved_links: edge_count,
            dangling_links: self.dangling_links().len(),
            orphaned_notes: self.orphaned_notes().len(),
            average_links_per_note,
        }
    }

    pub fn contains(&self, id: NoteId) -> bool {
        self.id_index.contains_key(&id)
    }

    /// Get node count
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get resolved edge count
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn add_outgoing(&mut self, source: NodeIndex, links: &BTreeSet<String>) {
        let targets: Vec<NodeIndex> = links
            .iter()
            .filter_map(|title| self.title_index.get(title))
            .flatten()
            .copied()
            .collect();
        for target in targets {
            self.graph.add_edge(source, target, ());
        }
    }

    fn index_title(&mut self, title: &str, idx: NodeIndex) {
        self.title_index
            .entry(title.to_string())
            .or_default()
            .insert(idx);
    }

    fn unindex_title(&mut self, title: &str, idx: NodeIndex) {
        if let Some(nodes) = self.title_index.get_mut(title) {
            nodes.remove(&idx);
            if nodes.is_empty() {
                self.title_index.remove(title);
            }
        }
    }
}

impl Default for LinkGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_notes: usize,
    pub resolved_links: usize,
    pub dangling_links: usize,
    pub orphaned_notes: usize,
    pub average_links_per_note: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_test_note(title: &str, links: Vec<&str>) -> Note {
        let content = links
            .iter()
            .map(|target| format!("[[{}]]", target))
            .collect::<Vec<_>>()
            .join(" ");
        Note::new(title, content, title, Utc::now())
    }

    fn ids(notes: &[&Note]) -> BTreeSet<NoteId> {
        notes.iter().map(|n| n.id()).collect()
    }

    #[test]
    fn test_upsert_notes() {
        let mut graph = LinkGraph::new();
        let a = create_test_note("A", vec![]);
        let b = create_test_note("B", vec![]);

        graph.upsert_note(&a);
        graph.upsert_note(&b);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_backlinks() {
        let mut graph = LinkGraph::new();
        let alpha = create_test_note("Alpha", vec!["Beta"]);
        let beta = create_test_note("Beta", vec![]);

        graph.upsert_note(&alpha);
        graph.upsert_note(&beta);

        assert_eq!(graph.backlinks("Beta"), ids(&[&alpha]));
        assert!(graph.backlinks("Alpha").is_empty());
    }

    #[test]
    fn test_forward_reference_resolves_when_target_appears() {
        let mut graph = LinkGraph::new();
        let alpha = create_test_note("Alpha", vec!["Later"]);
        graph.upsert_note(&alpha);

        assert!(graph.backlinks("Later").is_empty());
        assert_eq!(graph.dangling_links().len(), 1);

        let later = create_test_note("Later", vec![]);
        graph.upsert_note(&later);

        assert_eq!(graph.backlinks("Later"), ids(&[&alpha]));
        assert!(graph.dangling_links().is_empty());
    }

    #[test]
    fn test_dangling_never_in_backlinks() {
        let mut graph = LinkGraph::new();
        let a = create_test_note("A", vec!["Ghost"]);
        graph.upsert_note(&a);

        assert!(graph.backlinks("Ghost").is_empty());
        assert_eq!(
            graph.edges(),
            vec![GraphEdge {
                source: a.id(),
                target: "Ghost".to_string()
            }]
        );
    }

    #[test]
    fn test_duplicate_titles() {
        let mut graph = LinkGraph::new();
        let src = create_test_note("Src", vec!["Twin"]);
        let t1 = create_test_note("Twin", vec![]);
        let t2 = create_test_note("Twin", vec![]);
        graph.upsert_note(&src);
        graph.upsert_note(&t1);
        graph.upsert_note(&t2);

        assert_eq!(graph.resolve("Twin"), ids(&[&t1, &t2]));
        assert_eq!(graph.forward_links(src.id()), ids(&[&t1, &t2]));
        assert_eq!(graph.backlinks("Twin"), ids(&[&src]));
    }

    #[test]
    fn test_self_link() {
        let mut graph = LinkGraph::new();
        let narcissus = create_test_note("Me", vec!["Me"]);
        graph.upsert_note(&narcissus);
        graph.upsert_note(&narcissus);

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.backlinks("Me"), ids(&[&narcissus]));
    }

    #[test]
    fn test_title_change_moves_backlinks() {
        let mut graph = LinkGraph::new();
        let linker = create_test_note("Linker", vec!["Old", "New"]);
        let mut target = create_test_note("Old", vec![]);
        graph.upsert_note(&linker);
        graph.upsert_note(&target);
        assert_eq!(graph.backlinks("Old"), ids(&[&linker]));

        target.set_title("New");
        graph.upsert_note(&target);

        assert!(graph.backlinks("Old").is_empty());
        assert_eq!(graph.backlinks("New"), ids(&[&linker]));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_remove_note() {
        let mut graph = LinkGraph::new();
        let a = create_test_note("A", vec!["B"]);
        let b = create_test_note("B", vec!["A"]);
        graph.upsert_note(&a);
        graph.upsert_note(&b);
        assert_eq!(graph.edge_count(), 2);

        assert!(graph.remove_note(b.id()));
        assert!(!graph.remove_note(b.id()));
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.backlinks("A").is_empty());
        assert_eq!(graph.dangling_links().len(), 1);
    }

    #[test]
    fn test_incremental_matches_rebuild() {
        let mut graph = LinkGraph::new();
        let a = create_test_note("A", vec!["B", "C"]);
        let b = create_test_note("B", vec!["C", "Nowhere"]);
        let mut c = create_test_note("C", vec!["A"]);
        graph.upsert_note(&a);
        graph.upsert_note(&b);
        graph.upsert_note(&c);
        c.set_title("B");
        graph.upsert_note(&c);

        let rebuilt = LinkGraph::from_notes([&a, &b, &c]);
        assert_eq!(graph.resolved_edges(), rebuilt.resolved_edges());
        assert_eq!(graph.edges(), rebuilt.edges());
        assert_eq!(graph.nodes(), rebuilt.nodes());
    }

    #[test]
    fn test_orphaned_notes() {
        let orphan = create_test_note("Orphan", vec![]);
        let a = create_test_note("A", vec![]);
        let b = create_test_note("B", vec!["A"]);
        let graph = LinkGraph::from_notes([&orphan, &a, &b]);

        assert_eq!(graph.orphaned_notes(), vec![orphan.id()]);
    }

    #[test]
    fn test_graph_stats() {
        let a = create_test_note("A", vec![]);
        let b = create_test_note("B", vec!["A", "Missing"]);
        let graph = LinkGraph::from_notes([&a, &b]);

        let stats = graph.stats();
        assert_eq!(stats.total_notes, 2);
        assert_eq!(stats.resolved_links, 1);
        assert_eq!(stats.dangling_links, 1);
        assert_eq!(stats.orphaned_notes, 0);
        assert!((stats.average_links_per_note - 0.5).abs() < f64::EPSILON);
    }
}
