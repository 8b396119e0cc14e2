//! US airport dimension.

use anyhow::{Context, Result};
use polars::prelude::*;

/// Expands a two-letter continent code to its full name; codes outside
/// the seven-way mapping yield null.
fn continent_name_expr() -> Expr {
    when(col("continent").eq(lit("NA")))
        .then(lit("North America"))
        .when(col("continent").eq(lit("AF")))
        .then(lit("Africa"))
        .when(col("continent").eq(lit("AN")))
        .then(lit("Antarctica"))
        .when(col("continent").eq(lit("AS")))
        .then(lit("Asia"))
        .when(col("continent").eq(lit("EU")))
        .then(lit("Europe"))
        .when(col("continent").eq(lit("OC")))
        .then(lit("Oceania"))
        .when(col("continent").eq(lit("SA")))
        .then(lit("South America"))
        .otherwise(lit(NULL))
        .alias("continent_name")
}

/// Builds `us_airport_dim`: one row per (already US-filtered) airport
/// record. `airport_id` is a 1-based row index after a stable sort on
/// `iata_code`; `state_code` is the trailing two characters of
/// `iso_region`.
pub fn build_airport_dim(airports: &DataFrame) -> Result<DataFrame> {
    airports
        .clone()
        .lazy()
        .sort(
            ["iata_code"],
            SortMultipleOptions::default()
                .with_maintain_order(true)
                .with_nulls_last(true),
        )
        .with_row_index("airport_id", Some(1))
        .select([
            col("airport_id"),
            col("iata_code").alias("airport_code"),
            col("type").alias("airport_type"),
            col("name").alias("airport_name"),
            col("continent").alias("continent_code"),
            continent_name_expr(),
            col("iso_country").alias("country_code"),
            col("iso_region")
                .str()
                .slice(lit(-2), lit(2))
                .alias("state_code"),
            col("municipality"),
        ])
        .collect()
        .context("build us_airport_dim")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airports() -> DataFrame {
        DataFrame::new(vec![
            Column::new("iata_code".into(), ["JFK", "ABQ", "XNA"]),
            Column::new(
                "type".into(),
                ["large_airport", "large_airport", "medium_airport"],
            ),
            Column::new(
                "name".into(),
                ["John F Kennedy Intl", "Albuquerque Intl", "Northwest Arkansas"],
            ),
            Column::new("continent".into(), ["NA", "XX", "NA"]),
            Column::new("iso_country".into(), ["US", "US", "US"]),
            Column::new("iso_region".into(), ["US-NY", "US-NM", "US-AR"]),
            Column::new(
                "municipality".into(),
                ["New York", "Albuquerque", "Fayetteville"],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn continent_codes_expand_and_unknown_codes_stay() {
        let dim = build_airport_dim(&airports()).unwrap();
        assert_eq!(dim.height(), 3);

        // Sorted by airport code: ABQ, JFK, XNA.
        let codes = dim.column("airport_code").unwrap().str().unwrap();
        assert_eq!(codes.get(0), Some("ABQ"));

        let continents = dim.column("continent_name").unwrap().str().unwrap();
        // ABQ carries the unmapped code "XX": null name, row present.
        assert_eq!(continents.get(0), None);
        assert_eq!(continents.get(1), Some("North America"));
    }

    #[test]
    fn state_code_is_the_region_suffix() {
        let dim = build_airport_dim(&airports()).unwrap();
        let states = dim.column("state_code").unwrap().str().unwrap();
        assert_eq!(states.get(0), Some("NM"));
        assert_eq!(states.get(1), Some("NY"));
    }

    #[test]
    fn surrogate_keys_follow_code_order() {
        let dim = build_airport_dim(&airports()).unwrap();
        let ids = dim.column("airport_id").unwrap().u32().unwrap();
        assert_eq!(ids.get(0), Some(1));
        assert_eq!(ids.get(2), Some(3));
    }
}
