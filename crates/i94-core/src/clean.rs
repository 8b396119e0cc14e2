//! Record normalizer for the raw immigration and temperature extracts.
//!
//! Immigration cleaning order matters and is fixed:
//! integer coercion, SAS date conversion, sparse column drop, `cicid`
//! dedupe, all-null row drop. Every step is null-preserving: a value
//! that cannot be coerced becomes null, it never fails the run.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use polars::prelude::{
    BooleanChunked, ChunkFull, DataFrame, DataType, IntoLazy, NewChunkedArray, col, lit,
};
use tracing::debug;

use i94_common::any_to_string;

/// Columns coerced from their raw (typically float) representation to
/// integers. Unparseable values become null.
pub const INTEGER_CODE_COLUMNS: [&str; 8] = [
    "cicid", "i94yr", "i94mon", "i94cit", "i94res", "i94mode", "i94bir", "i94visa",
];

/// Columns holding SAS epoch-day offsets, converted to calendar dates.
pub const SAS_DATE_COLUMNS: [&str; 2] = ["arrdate", "depdate"];

/// Columns dropped unconditionally; the source data leaves them mostly
/// empty.
pub const SPARSE_COLUMNS: [&str; 3] = ["occup", "entdepu", "insnum"];

/// Days between the SAS epoch (1960-01-01) and the Unix epoch
/// (1970-01-01). A SAS day offset minus this is a polars `Date` value.
const SAS_TO_UNIX_EPOCH_DAYS: i32 = 3653;

/// Cleans the raw immigration relation.
pub fn clean_immigration(df: DataFrame) -> Result<DataFrame> {
    let input_rows = df.height();
    let mut df = df;

    // 1. Integer coercion. Series::cast is non-strict: values that
    //    cannot be represented become null.
    for name in INTEGER_CODE_COLUMNS {
        let Some(cast) = df
            .column(name)
            .ok()
            .map(|c| c.as_materialized_series().cast(&DataType::Int64))
        else {
            continue;
        };
        let cast = cast.with_context(|| format!("coerce column {name} to integer"))?;
        df.with_column(cast)?;
    }

    // 2. SAS epoch-day offsets to dates. Null offsets stay null.
    let mut date_exprs = Vec::new();
    for name in SAS_DATE_COLUMNS {
        let Some(cast) = df
            .column(name)
            .ok()
            .map(|c| c.as_materialized_series().cast(&DataType::Int32))
        else {
            continue;
        };
        let cast = cast.with_context(|| format!("coerce column {name} to day offset"))?;
        df.with_column(cast)?;
        date_exprs.push(
            (col(name) - lit(SAS_TO_UNIX_EPOCH_DAYS))
                .cast(DataType::Date)
                .alias(name),
        );
    }
    if !date_exprs.is_empty() {
        df = df.lazy().with_columns(date_exprs).collect()?;
    }

    // 3. Drop the known-sparse columns when present.
    for name in SPARSE_COLUMNS {
        if df.column(name).is_ok() {
            df = df.drop(name)?;
        }
    }

    // 4. One row per cicid; the first occurrence wins.
    df = dedupe_by_key(&df, "cicid")?;

    // 5. Drop rows with no remaining data at all.
    df = drop_all_null_rows(&df)?;

    debug!(
        input_rows,
        output_rows = df.height(),
        "immigration records cleaned"
    );
    Ok(df)
}

/// Cleans the raw temperature relation: exact duplicate rows out, null
/// average temperatures out.
pub fn clean_temperature(df: DataFrame) -> Result<DataFrame> {
    let input_rows = df.height();
    let deduped = dedupe_exact(&df)?;
    let cleaned = deduped
        .lazy()
        .filter(col("AverageTemperature").is_not_null())
        .collect()
        .context("drop null average temperatures")?;
    debug!(
        input_rows,
        output_rows = cleaned.height(),
        "temperature records cleaned"
    );
    Ok(cleaned)
}

/// Keeps the first row per key value. Null keys render to the empty
/// string and therefore collapse to a single row as well.
fn dedupe_by_key(df: &DataFrame, key: &str) -> Result<DataFrame> {
    if df.height() == 0 || df.column(key).is_err() {
        return Ok(df.clone());
    }
    let column = df.column(key)?;
    let mut seen = BTreeSet::new();
    let mut keep = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let rendered = any_to_string(&column.get(idx)?);
        keep.push(seen.insert(rendered));
    }
    let mask = BooleanChunked::from_slice("dedupe".into(), &keep);
    Ok(df.filter(&mask)?)
}

/// Keeps the first occurrence of each full row.
fn dedupe_exact(df: &DataFrame) -> Result<DataFrame> {
    if df.height() == 0 {
        return Ok(df.clone());
    }
    let columns = df.get_columns();
    let mut seen = BTreeSet::new();
    let mut keep = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut composite = String::new();
        for (pos, column) in columns.iter().enumerate() {
            if pos > 0 {
                composite.push('|');
            }
            composite.push_str(&any_to_string(&column.get(idx)?));
        }
        keep.push(seen.insert(composite));
    }
    let mask = BooleanChunked::from_slice("dedupe".into(), &keep);
    Ok(df.filter(&mask)?)
}

fn drop_all_null_rows(df: &DataFrame) -> Result<DataFrame> {
    if df.height() == 0 {
        return Ok(df.clone());
    }
    let mut keep = BooleanChunked::full("keep".into(), false, df.height());
    for column in df.get_columns() {
        keep = &keep | &column.as_materialized_series().is_not_null();
    }
    Ok(df.filter(&keep)?)
}
