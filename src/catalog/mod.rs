//! Song catalog: records, record sources and the catalog file format

pub mod record;
pub mod source;
pub mod tabular;

pub use record::{is_unknown, MusicRecord, UNKNOWN};
pub use source::{CsvFileSource, InMemorySource, RecordSource};
pub use tabular::{read_catalog, read_catalog_file, write_catalog, write_catalog_file};

use thiserror::Error;

/// Catalog errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed catalog file
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Failure reported by an external record source
    #[error("Record source '{source_name}' failed: {message}")]
    Source { source_name: String, message: String },
}

pub type CatalogResult<T> = Result<T, CatalogError>;
