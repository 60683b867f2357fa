//! In-memory music knowledge graph
//!
//! An undirected multigraph over artist and genre nodes:
//! - nodes: insertion-ordered set of `NodeKey`, the position is the dense node index
//! - edges: insertion-ordered set of (lower index, higher index, relation)
//!
//! Two nodes may be linked by several edges as long as their relations differ.

use super::types::{NodeKey, NodeKind, RelationKind};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use songgraph_algorithms::GraphView;
use std::collections::BTreeMap;

/// Undirected edge between two dense node indices, stored with `source <= target`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: usize,
    pub target: usize,
    pub relation: RelationKind,
}

impl GraphEdge {
    pub fn new(a: usize, b: usize, relation: RelationKind) -> Self {
        let (source, target) = if a <= b { (a, b) } else { (b, a) };
        GraphEdge {
            source,
            target,
            relation,
        }
    }

    /// Check if this edge connects two specific nodes (in either direction)
    pub fn connects(&self, a: usize, b: usize) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }

    /// The endpoint opposite to `node`, if `node` is an endpoint
    pub fn other(&self, node: usize) -> Option<usize> {
        if self.source == node {
            Some(self.target)
        } else if self.target == node {
            Some(self.source)
        } else {
            None
        }
    }
}

/// Summary counts of a graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub artist_count: usize,
    pub genre_count: usize,
    pub edge_count: usize,
    /// Nodes without any edge
    pub isolated_count: usize,
    pub edges_by_relation: BTreeMap<String, usize>,
}

/// Music knowledge graph
#[derive(Debug, Clone, Default)]
pub struct MusicGraph {
    nodes: IndexSet<NodeKey>,
    edges: IndexSet<GraphEdge>,
}

impl MusicGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node if absent and return its dense index
    pub fn add_node(&mut self, key: NodeKey) -> usize {
        self.nodes.insert_full(key).0
    }

    /// Insert an undirected edge between two existing nodes.
    ///
    /// Returns `false` if either index is out of range or the same (pair, relation) exists.
    pub fn add_edge(&mut self, a: usize, b: usize, relation: RelationKind) -> bool {
        if a >= self.nodes.len() || b >= self.nodes.len() {
            return false;
        }
        self.edges.insert(GraphEdge::new(a, b, relation))
    }

    /// Insert both endpoints (if absent) and the edge between them
    pub fn connect(&mut self, a: NodeKey, b: NodeKey, relation: RelationKind) -> bool {
        let a = self.add_node(a);
        let b = self.add_node(b);
        self.add_edge(a, b, relation)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node at a dense index
    pub fn node(&self, index: usize) -> Option<&NodeKey> {
        self.nodes.get_index(index)
    }

    /// Dense index of a node
    pub fn index_of(&self, key: &NodeKey) -> Option<usize> {
        self.nodes.get_index_of(key)
    }

    pub fn contains(&self, key: &NodeKey) -> bool {
        self.nodes.contains(key)
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &NodeKey> {
        self.nodes.iter()
    }

    /// Nodes of one kind, in insertion order
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &NodeKey> {
        self.nodes.iter().filter(move |k| k.kind == kind)
    }

    /// Edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter()
    }

    /// Distinct neighbors of a node, in edge insertion order
    pub fn neighbors(&self, key: &NodeKey) -> Vec<&NodeKey> {
        let Some(idx) = self.index_of(key) else {
            return Vec::new();
        };

        let mut seen = IndexSet::new();
        for edge in &self.edges {
            if let Some(other) = edge.other(idx) {
                seen.insert(other);
            }
        }
        seen.into_iter().filter_map(|i| self.node(i)).collect()
    }

    /// All relations recorded between two nodes
    pub fn relations_between(&self, a: &NodeKey, b: &NodeKey) -> Vec<RelationKind> {
        match (self.index_of(a), self.index_of(b)) {
            (Some(a), Some(b)) => self
                .edges
                .iter()
                .filter(|e| e.connects(a, b))
                .map(|e| e.relation)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Dense CSR view for the walk sampler. Parallel edges collapse into one adjacency.
    pub fn view(&self) -> GraphView {
        GraphView::from_edges(
            self.nodes.len(),
            self.edges.iter().map(|e| (e.source, e.target)),
        )
    }

    pub fn statistics(&self) -> GraphStatistics {
        let mut stats = GraphStatistics {
            edge_count: self.edges.len(),
            ..Default::default()
        };

        for key in &self.nodes {
            match key.kind {
                NodeKind::Artist => stats.artist_count += 1,
                NodeKind::Genre => stats.genre_count += 1,
            }
        }

        let mut touched = vec![false; self.nodes.len()];
        for edge in &self.edges {
            touched[edge.source] = true;
            touched[edge.target] = true;
            *stats
                .edges_by_relation
                .entry(edge.relation.as_str().to_string())
                .or_insert(0) += 1;
        }
        stats.isolated_count = touched.iter().filter(|t| !**t).count();

        stats
    }
}
