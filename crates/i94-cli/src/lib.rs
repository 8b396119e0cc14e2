//! I-94 warehouse CLI: argument parsing, logging setup, and the staged
//! run pipeline.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod pipeline;
pub mod summary;
pub mod types;
