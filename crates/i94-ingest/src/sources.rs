//! Readers for the five source extracts.

use std::fs;
use std::path::{Path, PathBuf};

use polars::prelude::{
    CsvParseOptions, CsvReadOptions, DataFrame, IntoLazy, ParquetReader, SerReader, col, lit,
};
use tracing::debug;

use crate::error::IngestError;

/// Reads the immigration extract from a parquet file, or from every
/// `*.parquet` part file directly under a directory.
///
/// Part files are read in path order and stacked; an empty directory is
/// a configuration error.
pub fn read_immigration(path: &Path) -> Result<DataFrame, IngestError> {
    if !path.exists() {
        return Err(IngestError::SourceMissing {
            path: path.to_path_buf(),
        });
    }
    if path.is_file() {
        return read_parquet_file(path);
    }

    let mut parts: Vec<PathBuf> = fs::read_dir(path)
        .map_err(|e| IngestError::ParquetRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| p.extension().and_then(|ext| ext.to_str()) == Some("parquet"))
        .collect();
    parts.sort();
    if parts.is_empty() {
        return Err(IngestError::EmptyParquetDir {
            path: path.to_path_buf(),
        });
    }

    let mut stacked: Option<DataFrame> = None;
    for part in &parts {
        let df = read_parquet_file(part)?;
        stacked = Some(match stacked {
            Some(acc) => acc.vstack(&df).map_err(|e| IngestError::ParquetRead {
                path: part.clone(),
                message: e.to_string(),
            })?,
            None => df,
        });
    }
    let df = stacked.unwrap_or_default();
    debug!(
        source = %path.display(),
        part_files = parts.len(),
        rows = df.height(),
        "immigration extract loaded"
    );
    Ok(df)
}

fn read_parquet_file(path: &Path) -> Result<DataFrame, IngestError> {
    let file = fs::File::open(path).map_err(|e| IngestError::ParquetRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    ParquetReader::new(file)
        .finish()
        .map_err(|e| IngestError::ParquetRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Reads the city temperature history CSV (comma-delimited, header row).
pub fn read_temperature(path: &Path) -> Result<DataFrame, IngestError> {
    let df = read_csv(path, b',')?;
    debug!(source = %path.display(), rows = df.height(), "temperature extract loaded");
    Ok(df)
}

/// Reads the US city demographics CSV (semicolon-delimited, header row).
pub fn read_demographics(path: &Path) -> Result<DataFrame, IngestError> {
    let df = read_csv(path, b';')?;
    debug!(source = %path.display(), rows = df.height(), "demographics extract loaded");
    Ok(df)
}

/// Reads the airport codes CSV and keeps US-located airports only.
///
/// The `iso_country == "US"` filter is applied at load time; everything
/// downstream only ever sees US airports.
pub fn read_airports(path: &Path) -> Result<DataFrame, IngestError> {
    let df = read_csv(path, b',')?;
    let total = df.height();
    let filtered = df
        .lazy()
        .filter(col("iso_country").eq(lit("US")))
        .collect()
        .map_err(|e| IngestError::CsvRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    debug!(
        source = %path.display(),
        rows = filtered.height(),
        dropped = total - filtered.height(),
        "airport extract loaded (US only)"
    );
    Ok(filtered)
}

/// Reads the SAS label description file as text with tab characters
/// stripped, ready for the block decoder.
pub fn read_label_text(path: &Path) -> Result<String, IngestError> {
    let content = fs::read_to_string(path).map_err(|source| IngestError::LabelRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content.replace('\t', ""))
}

fn read_csv(path: &Path, separator: u8) -> Result<DataFrame, IngestError> {
    if !path.exists() {
        return Err(IngestError::SourceMissing {
            path: path.to_path_buf(),
        });
    }
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(1000))
        .with_parse_options(CsvParseOptions::default().with_separator(separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}
