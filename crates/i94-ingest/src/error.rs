//! Ingest error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading source extracts.
///
/// Any of these is a configuration error in the sense of the run
/// contract: the pipeline aborts before writing output.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("source not found: {path}")]
    SourceMissing { path: PathBuf },

    #[error("no parquet part files under {path}")]
    EmptyParquetDir { path: PathBuf },

    #[error("failed to read CSV {path}: {message}")]
    CsvRead { path: PathBuf, message: String },

    #[error("failed to read parquet {path}: {message}")]
    ParquetRead { path: PathBuf, message: String },

    #[error("failed to read label file {path}")]
    LabelRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
