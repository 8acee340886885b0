use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Classification of a link reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    InternalFile,
    Anchor,
    ExternalUrl,
}

/// One classified reference from a source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEdge {
    pub source: String,
    /// Resolved corpus path for internal edges, the raw target otherwise.
    pub target: String,
    pub kind: EdgeKind,
    pub resolved: bool,
}

/// An internal link whose target does not resolve to any corpus path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BrokenLink {
    pub source: String,
    pub raw_target: String,
    pub line: usize,
}

/// A standard document that never links to the configured hub.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MissingCrossRef {
    pub path: String,
    pub hub: String,
}

/// A hub document missing one of its required outbound links.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HubViolation {
    pub hub: String,
    pub missing_target: String,
}

/// Directed document reference graph: nodes are corpus paths, edges are
/// resolved internal links.
#[derive(Debug, Default)]
pub struct RefGraph {
    graph: DiGraph<String, ()>,
    nodes: HashMap<String, NodeIndex>,
}

impl RefGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_document(&mut self, path: &str) -> NodeIndex {
        if let Some(&idx) = self.nodes.get(path) {
            return idx;
        }
        let idx = self.graph.add_node(path.to_string());
        self.nodes.insert(path.to_string(), idx);
        idx
    }

    /// Record a resolved internal link. Self-links carry no information for
    /// orphan analysis and are dropped.
    pub fn add_reference(&mut self, source: &str, target: &str) {
        if source == target {
            return;
        }
        let from = self.add_document(source);
        let to = self.add_document(target);
        self.graph.add_edge(from, to, ());
    }

    #[must_use]
    pub fn find_node(&self, path: &str) -> Option<NodeIndex> {
        self.nodes.get(path).copied()
    }

    /// Number of distinct documents linking to `path`.
    #[must_use]
    pub fn in_degree(&self, path: &str) -> usize {
        self.find_node(path).map_or(0, |idx| {
            let mut sources: Vec<NodeIndex> = self
                .graph
                .edges_directed(idx, Direction::Incoming)
                .map(|e| e.source())
                .collect();
            sources.sort_unstable();
            sources.dedup();
            sources.len()
        })
    }

    /// Documents linking to `path`, sorted.
    #[must_use]
    pub fn inbound_sources(&self, path: &str) -> Vec<String> {
        let Some(idx) = self.find_node(path) else {
            return Vec::new();
        };
        let mut sources: Vec<String> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| self.graph[e.source()].clone())
            .collect();
        sources.sort_unstable();
        sources.dedup();
        sources
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
