//! Shared utilities for the I-94 warehouse crates.
//!
//! This crate provides the Polars `AnyValue` helpers used across the
//! workspace: cell-to-string rendering, numeric extraction, and the
//! canonical key rendering for I-94 code columns.

pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use polars::{any_to_f64, any_to_string, code_key, format_numeric, parse_f64};
