//! Node embeddings
//!
//! Training glue over the skip-gram trainer, the immutable `EmbeddingStore`
//! and its versioned on-disk format.

pub mod persistence;
pub mod store;
pub mod trainer;

pub use persistence::{read_embeddings, write_embeddings, EmbeddingFileInfo, FORMAT_VERSION, MAGIC};
pub use store::EmbeddingStore;
pub use trainer::train_embeddings;

use crate::graph::ParseNodeKeyError;
use thiserror::Error;

/// Embedding errors
#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Invalid embedding file: {0}")]
    InvalidFormat(String),

    #[error("Unsupported embedding format version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Embedding file checksum mismatch")]
    ChecksumMismatch,

    #[error("Dimension mismatch for {node}: expected {expected}, got {got}")]
    DimensionMismatch {
        node: String,
        expected: usize,
        got: usize,
    },

    #[error(transparent)]
    InvalidNodeKey(#[from] ParseNodeKeyError),
}

pub type EmbeddingResult<T> = Result<T, EmbeddingError>;
