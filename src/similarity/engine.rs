//! Song similarity ranking
//!
//! A song is represented by the composite `embedding(artist) + embedding(genre)`.
//! Ranking:
//! 1. Score every catalog row against the query composite (cosine, in parallel)
//! 2. A row with the query's own title and artist scores `SELF_MATCH`
//! 3. Keep rows scoring above zero, stable-sorted by descending score
//! 4. Keep the first row per title, then the top N

use super::explain::FeatureContributions;
use crate::catalog::MusicRecord;
use crate::embedding::EmbeddingStore;
use crate::graph::NodeKey;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use songgraph_algorithms::{add_vectors, cosine_similarity};
use std::cmp::Ordering;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Score assigned to the query song itself
pub const SELF_MATCH: f32 = -1.0;

/// Song to find neighbors for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongQuery {
    pub title: String,
    pub artist: String,
    pub genre: String,
}

impl SongQuery {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        SongQuery {
            title: title.into(),
            artist: artist.into(),
            genre: genre.into(),
        }
    }

    /// Query built from a catalog row
    pub fn from_record(record: &MusicRecord) -> Self {
        Self::new(&record.title, &record.artist, &record.genre)
    }

    fn is_self(&self, record: &MusicRecord) -> bool {
        record.title == self.title && record.artist == self.artist
    }
}

/// One ranked result row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSong {
    pub record: MusicRecord,
    pub similarity: f32,
    pub contributions: FeatureContributions,
    pub influence: String,
}

/// Composite vector of an (artist, genre) pair: element-wise sum, zeros for unknown nodes
pub fn compose(store: &EmbeddingStore, artist: &str, genre: &str) -> Vec<f32> {
    add_vectors(
        store.lookup(&NodeKey::artist(artist)),
        store.lookup(&NodeKey::genre(genre)),
    )
}

/// Rank the catalog against `query` by scanning and composing every row.
///
/// Prefer `SimilarityEngine` for repeated queries; it composes each row once per store.
pub fn find_similar(
    query: &SongQuery,
    catalog: &[MusicRecord],
    store: &EmbeddingStore,
    top_n: usize,
) -> Vec<RankedSong> {
    let query_vec = compose(store, &query.artist, &query.genre);

    let scores: Vec<(f32, FeatureContributions)> = catalog
        .par_iter()
        .map(|record| {
            let candidate = compose(store, &record.artist, &record.genre);
            score_row(query, &query_vec, record, &candidate)
        })
        .collect();

    select_top(catalog, scores, top_n)
}

fn score_row(
    query: &SongQuery,
    query_vec: &[f32],
    record: &MusicRecord,
    candidate: &[f32],
) -> (f32, FeatureContributions) {
    if query.is_self(record) {
        return (SELF_MATCH, FeatureContributions::zero());
    }
    (
        cosine_similarity(query_vec, candidate),
        FeatureContributions::between(query_vec, candidate),
    )
}

/// Filter, order, deduplicate by title and cut to `top_n`. `scores` is aligned with `catalog`.
fn select_top(
    catalog: &[MusicRecord],
    scores: Vec<(f32, FeatureContributions)>,
    top_n: usize,
) -> Vec<RankedSong> {
    let mut candidates: Vec<(usize, f32, FeatureContributions)> = scores
        .into_iter()
        .enumerate()
        .filter(|(_, (sim, _))| *sim > 0.0)
        .map(|(row, (sim, contributions))| (row, sim, contributions))
        .collect();
    let positive = candidates.len();

    // Stable: equal scores keep catalog order
    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let mut seen_titles: FxHashSet<&str> = FxHashSet::default();
    let results: Vec<RankedSong> = candidates
        .into_iter()
        .filter(|(row, _, _)| seen_titles.insert(catalog[*row].title.as_str()))
        .take(top_n)
        .map(|(row, similarity, contributions)| RankedSong {
            record: catalog[row].clone(),
            similarity,
            influence: contributions.influence(),
            contributions,
        })
        .collect();

    debug!(
        "Ranked {} catalog rows: {} positive, {} returned",
        catalog.len(),
        positive,
        results.len()
    );
    results
}

/// Embeddings plus the composite of every catalog row under them
#[derive(Debug)]
struct ScoringSnapshot {
    store: Arc<EmbeddingStore>,
    composites: Vec<Vec<f32>>,
}

impl ScoringSnapshot {
    fn build(catalog: &[MusicRecord], store: Arc<EmbeddingStore>) -> Self {
        let composites = catalog
            .par_iter()
            .map(|record| compose(&store, &record.artist, &record.genre))
            .collect();
        Self { store, composites }
    }
}

/// Query service over a fixed catalog.
///
/// Row composites are computed once per published `EmbeddingStore`. `publish` swaps in a
/// completely built snapshot, so a concurrent query sees either the old or the new one.
#[derive(Debug)]
pub struct SimilarityEngine {
    catalog: Arc<Vec<MusicRecord>>,
    snapshot: RwLock<Arc<ScoringSnapshot>>,
}

impl SimilarityEngine {
    pub fn new(catalog: Arc<Vec<MusicRecord>>, store: Arc<EmbeddingStore>) -> Self {
        let snapshot = ScoringSnapshot::build(&catalog, store);
        Self {
            catalog,
            snapshot: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Replace the embeddings. Row composites are rebuilt before the swap.
    pub fn publish(&self, store: Arc<EmbeddingStore>) {
        let snapshot = Arc::new(ScoringSnapshot::build(&self.catalog, store));
        let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *guard = snapshot;
    }

    /// Currently published embeddings
    pub fn embeddings(&self) -> Arc<EmbeddingStore> {
        Arc::clone(&self.current().store)
    }

    pub fn catalog(&self) -> &[MusicRecord] {
        &self.catalog
    }

    /// Rank the catalog against `query`
    pub fn find_similar(&self, query: &SongQuery, top_n: usize) -> Vec<RankedSong> {
        let snapshot = self.current();
        let query_vec = compose(&snapshot.store, &query.artist, &query.genre);

        let scores: Vec<(f32, FeatureContributions)> = self
            .catalog
            .par_iter()
            .zip(snapshot.composites.par_iter())
            .map(|(record, candidate)| score_row(query, &query_vec, record, candidate))
            .collect();

        select_top(&self.catalog, scores, top_n)
    }

    fn current(&self) -> Arc<ScoringSnapshot> {
        let guard = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }
}
