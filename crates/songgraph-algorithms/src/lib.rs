pub mod common;
pub mod walk;
pub mod skipgram;
pub mod similarity;

pub use common::GraphView;
pub use walk::{generate_walks, biased_walk, transition_weight, WalkConfig};
pub use skipgram::{SkipGramConfig, SkipGramModel, SkipGramTrainer, Vocabulary};
pub use similarity::{cosine_similarity, add_vectors, hadamard};
