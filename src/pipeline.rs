//! End-to-end embedding pipeline
//!
//! fetch records -> build graph -> sample walks -> train embeddings.
//! The store is published once, after training has finished.

use crate::algo::{sample_walks, AlgoError};
use crate::catalog::{CatalogError, MusicRecord, RecordSource};
use crate::config::{ConfigError, SongGraphConfig};
use crate::embedding::{train_embeddings, EmbeddingError, EmbeddingStore};
use crate::graph::MusicGraph;
use crate::similarity::SimilarityEngine;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::info;

/// Pipeline errors
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Walk sampling error: {0}")]
    Algo(#[from] AlgoError),

    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Fetch,
    BuildGraph,
    SampleWalks,
    Train,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Fetch => "fetch",
            PipelineStage::BuildGraph => "build-graph",
            PipelineStage::SampleWalks => "sample-walks",
            PipelineStage::Train => "train",
        };
        f.write_str(name)
    }
}

/// Wall-clock time spent per stage
#[derive(Debug, Clone, Default)]
pub struct StageTimings {
    stages: Vec<(PipelineStage, Duration)>,
}

impl StageTimings {
    fn record(&mut self, stage: PipelineStage, elapsed: Duration) {
        info!("Stage {} finished in {:?}", stage, elapsed);
        self.stages.push((stage, elapsed));
    }

    pub fn get(&self, stage: PipelineStage) -> Option<Duration> {
        self.stages.iter().find(|(s, _)| *s == stage).map(|(_, d)| *d)
    }

    pub fn total(&self) -> Duration {
        self.stages.iter().map(|(_, d)| *d).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(PipelineStage, Duration)> {
        self.stages.iter()
    }
}

/// Output of a pipeline run
#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub records: Arc<Vec<MusicRecord>>,
    pub graph: Arc<MusicGraph>,
    pub store: Arc<EmbeddingStore>,
    /// Number of walks the embeddings were trained on
    pub walk_count: usize,
    pub timings: StageTimings,
}

impl TrainedModel {
    /// Query engine over the fetched records and the trained store
    pub fn engine(&self) -> SimilarityEngine {
        SimilarityEngine::new(Arc::clone(&self.records), Arc::clone(&self.store))
    }
}

/// Runs the pipeline with a validated configuration
#[derive(Debug, Clone)]
pub struct EmbeddingPipeline {
    config: SongGraphConfig,
}

impl EmbeddingPipeline {
    pub fn new(config: SongGraphConfig) -> PipelineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SongGraphConfig {
        &self.config
    }

    /// Fetch records from `source` and train embeddings on them
    pub fn run(&self, source: &dyn RecordSource) -> PipelineResult<TrainedModel> {
        info!("Fetching records from {}", source.name());
        let mut timings = StageTimings::default();

        let started = Instant::now();
        let records = source.fetch()?;
        timings.record(PipelineStage::Fetch, started.elapsed());

        self.run_stages(records, timings)
    }

    /// Train embeddings on records that are already in memory
    pub fn run_records(&self, records: Vec<MusicRecord>) -> PipelineResult<TrainedModel> {
        self.run_stages(records, StageTimings::default())
    }

    fn run_stages(
        &self,
        records: Vec<MusicRecord>,
        mut timings: StageTimings,
    ) -> PipelineResult<TrainedModel> {
        let started = Instant::now();
        let graph = MusicGraph::from_records(&records);
        timings.record(PipelineStage::BuildGraph, started.elapsed());

        let started = Instant::now();
        let corpus = sample_walks(&graph, &self.config.walk_config(), self.config.walk.workers)?;
        timings.record(PipelineStage::SampleWalks, started.elapsed());

        let started = Instant::now();
        let store = train_embeddings(&graph, &corpus, &self.config.skipgram_config())?;
        timings.record(PipelineStage::Train, started.elapsed());

        info!(
            "Pipeline finished: {} records, {} nodes, {} embeddings in {:?}",
            records.len(),
            graph.node_count(),
            store.len(),
            timings.total()
        );

        Ok(TrainedModel {
            records: Arc::new(records),
            graph: Arc::new(graph),
            store: Arc::new(store),
            walk_count: corpus.len(),
            timings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogResult, InMemorySource};
    use crate::graph::NodeKey;

    fn small_config() -> SongGraphConfig {
        let mut config = SongGraphConfig::default();
        config.walk.walks_per_node = 5;
        config.walk.walk_length = 6;
        config.walk.workers = 2;
        config.training.dimensions = 8;
        config.training.iterations = 2;
        config
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SongGraphConfig::default();
        config.walk.q = 0.0;
        assert!(matches!(
            EmbeddingPipeline::new(config),
            Err(PipelineError::Config(_))
        ));
    }

    #[test]
    fn test_run_produces_model() {
        let source = InMemorySource::new(vec![
            MusicRecord::new("Song1", "ArtistA", "GenreX").with_related("ArtistB", "collaboratesWith"),
            MusicRecord::new("Song2", "ArtistB", "GenreX"),
        ]);

        let model = EmbeddingPipeline::new(small_config()).unwrap().run(&source).unwrap();
        assert_eq!(model.records.len(), 2);
        assert_eq!(model.graph.node_count(), 3);
        assert_eq!(model.walk_count, 15);
        assert_eq!(model.store.dimensions(), 8);
        assert!(model.store.contains(&NodeKey::genre("GenreX")));
        assert!(model.timings.get(PipelineStage::Train).is_some());
        assert_eq!(model.timings.iter().count(), 4);
    }

    struct UnreachableSource;

    impl RecordSource for UnreachableSource {
        fn name(&self) -> &str {
            "unreachable"
        }

        fn fetch(&self) -> CatalogResult<Vec<MusicRecord>> {
            Err(CatalogError::Source {
                source_name: self.name().to_string(),
                message: "endpoint timed out".to_string(),
            })
        }
    }

    #[test]
    fn test_source_failure_surfaces_as_catalog_error() {
        let result = EmbeddingPipeline::new(small_config())
            .unwrap()
            .run(&UnreachableSource);

        match result {
            Err(PipelineError::Catalog(CatalogError::Source { source_name, message })) => {
                assert_eq!(source_name, "unreachable");
                assert_eq!(message, "endpoint timed out");
            }
            other => panic!("expected source error, got {:?}", other.map(|m| m.walk_count)),
        }
    }

    #[test]
    fn test_empty_source() {
        let model = EmbeddingPipeline::new(small_config())
            .unwrap()
            .run(&InMemorySource::new(Vec::new()))
            .unwrap();
        assert!(model.graph.is_empty());
        assert!(model.store.is_empty());
        assert_eq!(model.walk_count, 0);
    }

    #[test]
    fn test_same_seed_same_store() {
        let records = vec![
            MusicRecord::new("Song1", "ArtistA", "GenreX"),
            MusicRecord::new("Song2", "ArtistB", "GenreY").with_related("ArtistA", "influencedBy"),
        ];
        let pipeline = EmbeddingPipeline::new(small_config()).unwrap();

        let first = pipeline.run_records(records.clone()).unwrap();
        let second = pipeline.run_records(records).unwrap();
        assert_eq!(first.store.sorted_entries(), second.store.sorted_entries());
    }
}
