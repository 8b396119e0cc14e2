//! Core transformation logic for the I-94 immigration warehouse.
//!
//! The pipeline turns raw border-crossing extracts into a star schema:
//!
//! 1. [`labels`] decodes the SAS label reference file into code lookups.
//! 2. [`clean`] normalizes the raw immigration and temperature records.
//! 3. [`enrich`] joins decoded labels onto the cleaned records.
//! 4. [`dims`] and [`fact`] assemble the four dimension tables and the
//!    immigration fact table.
//! 5. [`relations`] catalogs the five output relations and their
//!    partitioning.

pub mod clean;
pub mod dims;
pub mod enrich;
pub mod fact;
pub mod labels;
pub mod relations;

pub use clean::{clean_immigration, clean_temperature};
pub use dims::{
    build_airport_dim, build_calendar_dim, build_country_dim, build_demographics_dim,
};
pub use enrich::add_code_descriptions;
pub use fact::build_immigration_fact;
pub use labels::{CodeBook, CodeLookup, LabelError, decode_block};
pub use relations::Relation;
