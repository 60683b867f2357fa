//! Graph algorithms module
//!
//! Algorithms are implemented in the `songgraph-algorithms` crate over dense node indices.
//! This module provides the integration/adapter layer for `MusicGraph`.

use crate::graph::{MusicGraph, NodeKey};
use thiserror::Error;
use tracing::{debug, info};

// Re-export algorithms
pub use songgraph_algorithms::{
    generate_walks, transition_weight, GraphView, WalkConfig,
    SkipGramConfig, SkipGramModel, SkipGramTrainer, Vocabulary,
    cosine_similarity, add_vectors, hadamard,
};

/// Algorithm execution errors
#[derive(Error, Debug)]
pub enum AlgoError {
    #[error("Failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

pub type AlgoResult<T> = Result<T, AlgoError>;

/// Walks over a `MusicGraph`, stored as dense node indices of that graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkCorpus {
    walks: Vec<Vec<usize>>,
}

impl WalkCorpus {
    pub fn new(walks: Vec<Vec<usize>>) -> Self {
        Self { walks }
    }

    pub fn len(&self) -> usize {
        self.walks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walks.is_empty()
    }

    /// Total number of node occurrences across all walks
    pub fn token_count(&self) -> usize {
        self.walks.iter().map(Vec::len).sum()
    }

    pub fn walks(&self) -> &[Vec<usize>] {
        &self.walks
    }

    /// Translate every walk into node keys of `graph`. Indices unknown to the graph are dropped.
    pub fn resolve<'g>(&self, graph: &'g MusicGraph) -> Vec<Vec<&'g NodeKey>> {
        self.walks
            .iter()
            .map(|walk| walk.iter().filter_map(|&idx| graph.node(idx)).collect())
            .collect()
    }
}

/// Sample a walk corpus on a dedicated pool of `workers` threads
pub fn sample_walks(
    graph: &MusicGraph,
    config: &WalkConfig,
    workers: usize,
) -> AlgoResult<WalkCorpus> {
    let view = graph.view();
    debug!(
        "Sampling walks over {} nodes / {} adjacencies",
        view.node_count,
        view.edge_count()
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .build()?;
    let walks = pool.install(|| generate_walks(&view, config));

    let corpus = WalkCorpus::new(walks);
    info!(
        "Generated {} walks ({} tokens) with p={}, q={}",
        corpus.len(),
        corpus.token_count(),
        config.return_bias,
        config.exploration_bias
    );
    Ok(corpus)
}
