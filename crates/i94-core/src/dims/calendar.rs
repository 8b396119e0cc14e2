//! Calendar dimension: one row per distinct arrival date.

use anyhow::{Context, Result};
use polars::prelude::*;

/// Builds `calendar_dim` from the cleaned immigration frame.
///
/// Distinct `arrdate` values become `date` rows with derived calendar
/// fields (ISO week and weekday conventions, `day` is the ordinal day
/// of the year). A null arrival date is kept as a null-date row; its
/// derived fields are null too.
pub fn build_calendar_dim(immigration: &DataFrame) -> Result<DataFrame> {
    immigration
        .clone()
        .lazy()
        .select([col("arrdate").alias("date")])
        .group_by([col("date")])
        .agg(Vec::<Expr>::new())
        .with_columns([
            col("date").dt().year().alias("year"),
            col("date").dt().month().alias("month"),
            col("date").dt().week().alias("week"),
            col("date").dt().ordinal_day().alias("day"),
            col("date").dt().weekday().alias("weekday"),
        ])
        .sort(["date"], SortMultipleOptions::default().with_nulls_last(true))
        .collect()
        .context("build calendar_dim")
}
