//! Record sources
//!
//! The pipeline never owns a global client. Whoever acquires the records hands the pipeline
//! a `RecordSource`, which yields a finite, in-memory batch.

use super::record::MusicRecord;
use super::tabular::read_catalog_file;
use super::CatalogResult;
use std::path::PathBuf;

/// Capability that produces a finite batch of music records
pub trait RecordSource: Send + Sync {
    /// Human-readable name used in logs
    fn name(&self) -> &str;

    /// Fetch all records
    fn fetch(&self) -> CatalogResult<Vec<MusicRecord>>;
}

/// Records already held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<MusicRecord>,
}

impl InMemorySource {
    pub fn new(records: Vec<MusicRecord>) -> Self {
        Self { records }
    }
}

impl RecordSource for InMemorySource {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn fetch(&self) -> CatalogResult<Vec<MusicRecord>> {
        Ok(self.records.clone())
    }
}

/// Records read from a catalog CSV file on every fetch
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
    label: String,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self { path, label }
    }
}

impl RecordSource for CsvFileSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn fetch(&self) -> CatalogResult<Vec<MusicRecord>> {
        read_catalog_file(&self.path)
    }
}
