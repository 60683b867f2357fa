//! Versioned binary embedding files
//!
//! Layout:
//!
//! ```text
//! [0..8)    magic  b"SGEMBED\0"
//! [8..40)   SHA-256 of the body
//! [40..)    body   bincode(PersistedEmbeddings)
//! ```
//!
//! Vectors are written as raw `f32`, so a save/load round trip is bit-exact.

use super::store::EmbeddingStore;
use super::{EmbeddingError, EmbeddingResult};
use crate::graph::NodeKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// File signature
pub const MAGIC: [u8; 8] = *b"SGEMBED\0";

/// Body format written by this build
pub const FORMAT_VERSION: u32 = 1;

const CHECKSUM_LEN: usize = 32;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedVector {
    node: String,
    vector: Vec<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedEmbeddings {
    format_version: u32,
    dimensions: u32,
    created_at_ms: i64,
    entries: Vec<PersistedVector>,
}

/// Metadata read back from an embedding file
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingFileInfo {
    pub format_version: u32,
    pub dimensions: usize,
    pub entry_count: usize,
    pub created_at: Option<DateTime<Utc>>,
}

/// Serialize a store into a writer
pub fn write_embeddings<W: Write>(store: &EmbeddingStore, mut writer: W) -> EmbeddingResult<()> {
    let dimensions = u32::try_from(store.dimensions())
        .map_err(|_| EmbeddingError::InvalidFormat("dimension does not fit in u32".to_string()))?;

    let body = PersistedEmbeddings {
        format_version: FORMAT_VERSION,
        dimensions,
        created_at_ms: Utc::now().timestamp_millis(),
        entries: store
            .sorted_entries()
            .into_iter()
            .map(|(key, vector)| PersistedVector {
                node: key.to_string(),
                vector: vector.to_vec(),
            })
            .collect(),
    };

    let bytes = bincode::serialize(&body)?;
    let checksum = Sha256::digest(&bytes);

    writer.write_all(&MAGIC)?;
    writer.write_all(&checksum)?;
    writer.write_all(&bytes)?;
    writer.flush()?;

    debug!("Wrote {} embeddings ({} body bytes)", body.entries.len(), bytes.len());
    Ok(())
}

/// Deserialize a store from a reader, verifying signature, checksum, version and dimensions
pub fn read_embeddings<R: Read>(mut reader: R) -> EmbeddingResult<(EmbeddingStore, EmbeddingFileInfo)> {
    let mut magic = [0u8; 8];
    reader.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(EmbeddingError::InvalidFormat("bad file signature".to_string()));
    }

    let mut checksum = [0u8; CHECKSUM_LEN];
    reader.read_exact(&mut checksum)?;

    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    if Sha256::digest(&bytes).as_slice() != checksum {
        return Err(EmbeddingError::ChecksumMismatch);
    }

    let body: PersistedEmbeddings = bincode::deserialize(&bytes)?;
    if body.format_version != FORMAT_VERSION {
        return Err(EmbeddingError::UnsupportedVersion {
            found: body.format_version,
            supported: FORMAT_VERSION,
        });
    }

    let info = EmbeddingFileInfo {
        format_version: body.format_version,
        dimensions: body.dimensions as usize,
        entry_count: body.entries.len(),
        created_at: DateTime::from_timestamp_millis(body.created_at_ms),
    };

    let mut entries = Vec::with_capacity(body.entries.len());
    for entry in body.entries {
        let key: NodeKey = entry.node.parse()?;
        entries.push((key, entry.vector));
    }
    let store = EmbeddingStore::new(info.dimensions, entries)?;

    Ok((store, info))
}

impl EmbeddingStore {
    /// Save to a file, replacing it
    pub fn save(&self, path: impl AsRef<Path>) -> EmbeddingResult<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        write_embeddings(self, BufWriter::new(file))?;
        info!("Saved {} embeddings to {:?}", self.len(), path);
        Ok(())
    }

    /// Load from a file
    pub fn load(path: impl AsRef<Path>) -> EmbeddingResult<Self> {
        Self::load_with_info(path).map(|(store, _)| store)
    }

    /// Load from a file and return its metadata as well
    pub fn load_with_info(path: impl AsRef<Path>) -> EmbeddingResult<(Self, EmbeddingFileInfo)> {
        let path = path.as_ref();
        info!("Loading embeddings from {:?}", path);
        let file = File::open(path)?;
        let (store, info) = read_embeddings(BufReader::new(file))?;
        info!(
            "Loaded {} embeddings of dimension {}",
            info.entry_count, info.dimensions
        );
        Ok((store, info))
    }
}
