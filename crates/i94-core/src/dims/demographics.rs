//! US demographics dimension, aggregated per state.

use anyhow::{Context, Result};
use polars::prelude::*;

use i94_common::{any_to_f64, format_numeric};

/// Builds `us_demographics_dim`: one row per (state code, state name)
/// with population sums and the median-age / household-size spreads
/// rendered as `"min - max"` strings. `state_id` is a 1-based row index
/// after sorting on the grouping key.
pub fn build_demographics_dim(demographics: &DataFrame) -> Result<DataFrame> {
    let grouped = demographics
        .clone()
        .lazy()
        .group_by([col("State Code"), col("State")])
        .agg([
            col("Median Age").min().alias("median_age_min"),
            col("Median Age").max().alias("median_age_max"),
            col("Total Population").sum().alias("population"),
            col("Number of Veterans").sum().alias("veteran_pop"),
            col("Foreign-born").sum().alias("foreign_born_pop"),
            col("Average Household Size").min().alias("household_min"),
            col("Average Household Size").max().alias("household_max"),
            col("Count").sum().alias("count"),
        ])
        .sort(["State Code", "State"], SortMultipleOptions::default())
        .with_row_index("state_id", Some(1))
        .collect()
        .context("aggregate demographics per state")?;

    let mut grouped = grouped;
    let median_age_range = range_column(
        &grouped,
        "median_age_min",
        "median_age_max",
        "median_age_range",
    )?;
    let household_range = range_column(
        &grouped,
        "household_min",
        "household_max",
        "avg_household_size_range",
    )?;
    grouped.with_column(median_age_range)?;
    grouped.with_column(household_range)?;

    grouped
        .lazy()
        .select([
            col("state_id"),
            col("State Code").alias("state_code"),
            col("State").alias("state_name"),
            col("median_age_range"),
            col("population"),
            col("veteran_pop"),
            col("foreign_born_pop"),
            col("avg_household_size_range"),
            col("count"),
        ])
        .collect()
        .context("build us_demographics_dim")
}

/// Renders `"{min} - {max}"` with trailing zeros trimmed; null when
/// either bound is missing.
fn range_column(
    df: &DataFrame,
    min_name: &str,
    max_name: &str,
    target: &str,
) -> Result<Series> {
    let min_col = df.column(min_name)?;
    let max_col = df.column(max_name)?;
    let mut builder = StringChunkedBuilder::new(target.into(), df.height());
    for idx in 0..df.height() {
        let lo = any_to_f64(&min_col.get(idx)?);
        let hi = any_to_f64(&max_col.get(idx)?);
        match (lo, hi) {
            (Some(lo), Some(hi)) => builder.append_value(format!(
                "{} - {}",
                format_numeric(lo),
                format_numeric(hi)
            )),
            _ => builder.append_null(),
        }
    }
    Ok(builder.finish().into_series())
}
