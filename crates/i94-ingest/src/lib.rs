//! Source readers for the I-94 warehouse.
//!
//! Every run reads five immutable extracts:
//!
//! - immigration events: a parquet file or a directory of part files
//! - SAS label descriptions: a semi-structured text file
//! - city temperature history: comma-delimited CSV
//! - US city demographics: semicolon-delimited CSV
//! - airport codes: comma-delimited CSV, filtered to US airports on load
//!
//! All tabular sources land in Polars `DataFrame`s; the label file is
//! returned as text (tab characters stripped) for the decoder in
//! `i94-core`.

pub mod error;
pub mod sources;

pub use error::IngestError;
pub use sources::{
    read_airports, read_demographics, read_immigration, read_label_text, read_temperature,
};
