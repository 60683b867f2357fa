//! SongGraph
//!
//! Song recommendation from a music knowledge graph. Artists and genres become nodes,
//! catalog relations become edges, node2vec walks over the graph train artist and genre
//! embeddings, and songs are compared through the sum of their artist and genre vectors.
//!
//! # Architecture
//!
//! - `catalog`: song records, pluggable record sources, the catalog CSV format
//! - `graph`: kind-namespaced nodes, typed undirected edges, construction from records
//! - `algo`: adapter over `songgraph-algorithms` (biased walks, skip-gram)
//! - `embedding`: trained vector store and its checksummed file format
//! - `similarity`: ranking, per-feature contributions, result export
//! - `pipeline`: fetch, build, walk and train in one call
//!
//! ## Example Usage
//!
//! ```rust
//! use songgraph::{EmbeddingPipeline, InMemorySource, MusicRecord, SongGraphConfig, SongQuery};
//!
//! let source = InMemorySource::new(vec![
//!     MusicRecord::new("Song1", "ArtistA", "GenreX").with_related("ArtistB", "collaboratesWith"),
//!     MusicRecord::new("Song2", "ArtistB", "GenreX"),
//! ]);
//!
//! let mut config = SongGraphConfig::default();
//! config.walk.walks_per_node = 10;
//! config.training.dimensions = 16;
//!
//! let model = EmbeddingPipeline::new(config).unwrap().run(&source).unwrap();
//! let engine = model.engine();
//!
//! let results = engine.find_similar(&SongQuery::new("Song1", "ArtistA", "GenreX"), 5);
//! assert!(results.iter().all(|song| song.record.title != "Song1"));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod catalog;
pub mod config;
pub mod embedding;
pub mod graph;
pub mod pipeline;
pub mod similarity;

// Re-export main types for convenience
pub use catalog::{
    CatalogError, CatalogResult, CsvFileSource, InMemorySource, MusicRecord, RecordSource,
};

pub use graph::{GraphBuilder, GraphStatistics, MusicGraph, NodeKey, NodeKind, RelationKind};

pub use algo::{sample_walks, AlgoError, AlgoResult, WalkCorpus};

pub use embedding::{train_embeddings, EmbeddingError, EmbeddingResult, EmbeddingStore};

pub use similarity::{
    find_similar, FeatureContributions, RankedSong, SimilarityEngine, SongQuery,
};

pub use config::{ConfigError, ConfigResult, SongGraphConfig};

pub use pipeline::{EmbeddingPipeline, PipelineError, PipelineResult, TrainedModel};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.3.0");
    }
}
