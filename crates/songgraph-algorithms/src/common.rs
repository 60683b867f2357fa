//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of the graph topology for algorithm execution.

/// A dense, integer-indexed view of an undirected graph using Compressed Sparse Row (CSR) format.
///
/// Nodes are addressed by their dense index `0..node_count`. Each neighbor list is sorted and
/// free of duplicates, so parallel edges of a multigraph appear once.
#[derive(Debug, Clone, Default)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Offsets into `targets`. Size = node_count + 1
    pub offsets: Vec<usize>,
    /// Contiguous array of neighbor indices
    pub targets: Vec<usize>,
}

impl GraphView {
    /// Build a view from undirected edges given as pairs of dense node indices.
    ///
    /// Both directions are recorded. Edges referencing an index `>= node_count` are ignored.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); node_count];

        for (u, v) in edges {
            if u >= node_count || v >= node_count {
                continue;
            }
            adjacency[u].push(v);
            if u != v {
                adjacency[v].push(u);
            }
        }

        Self::from_adjacency_list(adjacency)
    }

    /// Flatten adjacency lists into CSR, sorting and deduplicating each row
    pub fn from_adjacency_list(adjacency: Vec<Vec<usize>>) -> Self {
        let node_count = adjacency.len();
        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut targets = Vec::new();

        offsets.push(0);
        for mut neighbors in adjacency {
            neighbors.sort_unstable();
            neighbors.dedup();
            targets.extend(neighbors);
            offsets.push(targets.len());
        }

        GraphView {
            node_count,
            offsets,
            targets,
        }
    }

    /// Get the degree of a node (by index)
    pub fn degree(&self, idx: usize) -> usize {
        self.offsets[idx + 1] - self.offsets[idx]
    }

    /// Get the sorted neighbors of a node
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        let start = self.offsets[idx];
        let end = self.offsets[idx + 1];
        &self.targets[start..end]
    }

    /// Whether `a` and `b` are adjacent. O(log d).
    pub fn is_neighbor(&self, a: usize, b: usize) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    /// Number of distinct undirected adjacencies (self-loops count once)
    pub fn edge_count(&self) -> usize {
        let loops = (0..self.node_count)
            .filter(|&i| self.is_neighbor(i, i))
            .count();
        (self.targets.len() - loops) / 2 + loops
    }
}
