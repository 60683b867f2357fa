//! Song similarity search over artist and genre embeddings

pub mod engine;
pub mod explain;
pub mod report;

pub use engine::{compose, find_similar, RankedSong, SimilarityEngine, SongQuery, SELF_MATCH};
pub use explain::{Feature, FeatureContributions};
pub use report::{results_to_json, write_results_csv, ResultRow};
