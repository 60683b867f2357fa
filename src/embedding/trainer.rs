//! Embedding training over a walk corpus

use super::store::EmbeddingStore;
use super::EmbeddingResult;
use crate::algo::{SkipGramConfig, SkipGramTrainer, WalkCorpus};
use crate::graph::MusicGraph;
use std::time::Instant;
use tracing::{debug, info};

/// Train skip-gram vectors for the nodes of `graph` that occur in `corpus`.
///
/// Nodes missing from the corpus, or below `min_count`, are absent from the result and
/// resolve to the zero vector on lookup.
pub fn train_embeddings(
    graph: &MusicGraph,
    corpus: &WalkCorpus,
    config: &SkipGramConfig,
) -> EmbeddingResult<EmbeddingStore> {
    let started = Instant::now();
    info!(
        "Training {}-dimensional embeddings on {} walks (window {}, {} iterations)",
        config.dimensions,
        corpus.len(),
        config.window_size,
        config.iterations
    );

    let trainer = SkipGramTrainer::new(config.clone());
    let model = trainer.train_with_progress(corpus.walks(), |iteration, loss| {
        debug!("Iteration {}/{} finished, loss {:.4}", iteration, config.iterations, loss);
    });

    let vocabulary_size = model.vocabulary().len();
    let entries = model
        .into_vectors()
        .into_iter()
        .filter_map(|(idx, vector)| graph.node(idx).map(|key| (key.clone(), vector)));
    let store = EmbeddingStore::new(config.dimensions, entries)?;

    info!(
        "Trained {} embeddings ({} graph nodes) in {:?}",
        vocabulary_size,
        graph.node_count(),
        started.elapsed()
    );
    Ok(store)
}
