//! Warehouse build pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: Read the five source extracts
//! 2. **Decode**: Parse the SAS label file into code lookups
//! 3. **Clean**: Normalize immigration and temperature records
//! 4. **Enrich**: Join decoded label values onto the immigration records
//! 5. **Model**: Build the four dimensions and the fact table
//! 6. **Output**: Write each relation as (partitioned) parquet
//!
//! Each stage takes the output of the previous stage and returns typed
//! results.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use i94_core::{
    CodeBook, Relation, add_code_descriptions, build_airport_dim, build_calendar_dim,
    build_country_dim, build_demographics_dim, build_immigration_fact, clean_immigration,
    clean_temperature,
};
use i94_ingest::{
    read_airports, read_demographics, read_immigration, read_label_text, read_temperature,
};
use i94_output::write_relation;

use crate::config::ResolvedConfig;
use crate::types::{RelationSummary, RunResult};

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Raw source extracts as read from disk.
#[derive(Debug)]
pub struct SourceData {
    pub immigration: DataFrame,
    pub label_text: String,
    pub temperature: DataFrame,
    pub demographics: DataFrame,
    pub airports: DataFrame,
}

/// Read all five source extracts.
pub fn ingest(config: &ResolvedConfig) -> Result<SourceData> {
    let span = info_span!("ingest");
    let _guard = span.enter();
    let started = Instant::now();

    let immigration =
        read_immigration(&config.immigration).context("read immigration events")?;
    debug!(rows = immigration.height(), "immigration events loaded");

    let label_text = read_label_text(&config.labels).context("read label descriptions")?;
    debug!(bytes = label_text.len(), "label descriptions loaded");

    let temperature = read_temperature(&config.temperature).context("read temperature history")?;
    debug!(rows = temperature.height(), "temperature history loaded");

    let demographics =
        read_demographics(&config.demographics).context("read city demographics")?;
    debug!(rows = demographics.height(), "city demographics loaded");

    let airports = read_airports(&config.airports).context("read airport codes")?;
    debug!(rows = airports.height(), "US airport codes loaded");

    info!(elapsed_ms = started.elapsed().as_millis() as u64, "ingest complete");
    Ok(SourceData {
        immigration,
        label_text,
        temperature,
        demographics,
        airports,
    })
}

// ============================================================================
// Stage 2: Decode labels
// ============================================================================

/// Parse the SAS label file into the code book used for enrichment.
pub fn decode_labels(label_text: &str) -> Result<CodeBook> {
    let span = info_span!("decode_labels");
    let _guard = span.enter();

    let code_book = CodeBook::from_label_text(label_text).context("decode label descriptions")?;
    info!(
        countries = code_book.countries.len(),
        travel_modes = code_book.travel_modes.len(),
        states = code_book.states.len(),
        "label descriptions decoded"
    );
    Ok(code_book)
}

// ============================================================================
// Stage 3: Clean
// ============================================================================

/// Cleaned inputs ready for enrichment and modeling.
#[derive(Debug)]
pub struct CleanedData {
    pub immigration: DataFrame,
    pub temperature: DataFrame,
}

/// Normalize the immigration and temperature extracts.
pub fn clean(immigration: DataFrame, temperature: DataFrame) -> Result<CleanedData> {
    let span = info_span!("clean");
    let _guard = span.enter();

    let raw_rows = immigration.height();
    let immigration = clean_immigration(immigration).context("clean immigration events")?;
    info!(
        raw_rows,
        kept_rows = immigration.height(),
        "immigration events cleaned"
    );

    let raw_rows = temperature.height();
    let temperature = clean_temperature(temperature).context("clean temperature history")?;
    info!(
        raw_rows,
        kept_rows = temperature.height(),
        "temperature history cleaned"
    );

    Ok(CleanedData {
        immigration,
        temperature,
    })
}

// ============================================================================
// Stage 4: Enrich
// ============================================================================

/// Join decoded label values onto the cleaned immigration records.
pub fn enrich(mut immigration: DataFrame, code_book: &CodeBook) -> Result<DataFrame> {
    let span = info_span!("enrich");
    let _guard = span.enter();

    add_code_descriptions(&mut immigration, code_book).context("apply label descriptions")?;
    info!(columns = immigration.width(), "immigration events enriched");
    Ok(immigration)
}

// ============================================================================
// Stage 5: Model
// ============================================================================

/// The five output relations of the star schema.
#[derive(Debug)]
pub struct StarSchema {
    pub calendar_dim: DataFrame,
    pub country_dim: DataFrame,
    pub us_airport_dim: DataFrame,
    pub us_demographics_dim: DataFrame,
    pub immigration_fact: DataFrame,
}

impl StarSchema {
    /// Relation frames in write order.
    pub fn relation(&self, relation: Relation) -> &DataFrame {
        match relation {
            Relation::CalendarDim => &self.calendar_dim,
            Relation::CountryDim => &self.country_dim,
            Relation::UsAirportDim => &self.us_airport_dim,
            Relation::UsDemographicsDim => &self.us_demographics_dim,
            Relation::ImmigrationFact => &self.immigration_fact,
        }
    }
}

/// Build the four dimensions and the fact table.
pub fn model(
    immigration: &DataFrame,
    temperature: &DataFrame,
    demographics: &DataFrame,
    airports: &DataFrame,
) -> Result<StarSchema> {
    let span = info_span!("model");
    let _guard = span.enter();
    let started = Instant::now();

    let calendar_dim = build_calendar_dim(immigration).context("build calendar_dim")?;
    debug!(rows = calendar_dim.height(), "calendar_dim built");

    let country_dim = build_country_dim(temperature).context("build country_dim")?;
    debug!(rows = country_dim.height(), "country_dim built");

    let us_airport_dim = build_airport_dim(airports).context("build us_airport_dim")?;
    debug!(rows = us_airport_dim.height(), "us_airport_dim built");

    let us_demographics_dim =
        build_demographics_dim(demographics).context("build us_demographics_dim")?;
    debug!(rows = us_demographics_dim.height(), "us_demographics_dim built");

    let immigration_fact = build_immigration_fact(
        immigration,
        &country_dim,
        &us_airport_dim,
        &us_demographics_dim,
    )
    .context("build immigration_fact")?;
    debug!(rows = immigration_fact.height(), "immigration_fact built");

    info!(elapsed_ms = started.elapsed().as_millis() as u64, "model complete");
    Ok(StarSchema {
        calendar_dim,
        country_dim,
        us_airport_dim,
        us_demographics_dim,
        immigration_fact,
    })
}

// ============================================================================
// Stage 6: Output
// ============================================================================

/// Write every relation under `output_dir`, or only report counts on a
/// dry run.
pub fn write_outputs(schema: &StarSchema, output_dir: &Path, dry_run: bool) -> Result<RunResult> {
    let span = info_span!("output");
    let _guard = span.enter();
    let started = Instant::now();

    let mut relations = Vec::with_capacity(Relation::ALL.len());
    for relation in Relation::ALL {
        let frame = schema.relation(relation);
        let path = if dry_run {
            None
        } else {
            let path = write_relation(frame, output_dir, relation)
                .with_context(|| format!("write {relation}"))?;
            debug!(relation = %relation, path = %path.display(), "relation written");
            Some(path)
        };
        relations.push(RelationSummary {
            relation,
            rows: frame.height(),
            path,
        });
    }

    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        dry_run,
        "output complete"
    );
    Ok(RunResult {
        output_dir: output_dir.to_path_buf(),
        dry_run,
        relations,
    })
}

/// Run all stages end to end.
pub fn run(config: &ResolvedConfig, dry_run: bool) -> Result<RunResult> {
    let sources = ingest(config)?;
    let code_book = decode_labels(&sources.label_text)?;
    let cleaned = clean(sources.immigration, sources.temperature)?;
    let immigration = enrich(cleaned.immigration, &code_book)?;
    let schema = model(
        &immigration,
        &cleaned.temperature,
        &sources.demographics,
        &sources.airports,
    )?;
    write_outputs(&schema, &config.output_dir, dry_run)
}
