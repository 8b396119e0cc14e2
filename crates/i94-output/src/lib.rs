//! Parquet output sink for the warehouse relations.
//!
//! Each relation is written under `<out_root>/<relation_name>/`, either
//! as a single part file or as hive-style `col=value` partition
//! directories. A rerun replaces the relation's previous output.

pub mod parquet;

pub use parquet::{HIVE_NULL_PARTITION, write_relation};
