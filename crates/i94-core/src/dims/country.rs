//! Country dimension from the temperature history.

use anyhow::{Context, Result};
use polars::prelude::*;

/// Builds `country_dim`: one row per distinct country name in the
/// cleaned temperature data, with min/max average temperature gathered
/// through a left join back onto the temperature rows.
///
/// `country_id` is a 1-based row index assigned after sorting by
/// country name.
pub fn build_country_dim(temperature: &DataFrame) -> Result<DataFrame> {
    let temperatures = temperature
        .clone()
        .lazy()
        .select([col("Country"), col("AverageTemperature")]);
    let countries = temperature
        .clone()
        .lazy()
        .select([col("Country")])
        .group_by([col("Country")])
        .agg(Vec::<Expr>::new());

    countries
        .join(
            temperatures,
            [col("Country")],
            [col("Country")],
            JoinArgs::new(JoinType::Left),
        )
        .group_by([col("Country")])
        .agg([
            col("AverageTemperature")
                .min()
                .alias("country_avg_temp_min"),
            col("AverageTemperature")
                .max()
                .alias("country_avg_temp_max"),
        ])
        .sort(["Country"], SortMultipleOptions::default())
        .with_row_index("country_id", Some(1))
        .select([
            col("country_id"),
            col("Country").alias("country_name"),
            col("country_avg_temp_min"),
            col("country_avg_temp_max"),
        ])
        .collect()
        .context("build country_dim")
}
