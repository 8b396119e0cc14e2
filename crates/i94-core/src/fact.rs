//! Immigration fact table assembly.
//!
//! The fact is the enriched immigration relation with foreign keys
//! resolved against the four dimensions through left outer equi-joins:
//! unmatched lookups become null keys, rows are never dropped.

use anyhow::{Context, Result};
use polars::prelude::*;
use tracing::debug;

/// Builds `immigration_fact` from the enriched immigration frame and
/// the country, airport, and demographics dimensions.
///
/// Country joins compare lowercased names (case-insensitive); the
/// airport and state joins are case-sensitive code equality. Both the
/// birth and residence country keys resolve from `i94cit_value`,
/// reproducing the source system's join condition (see DESIGN.md).
/// `record_id` is a 0-based monotonically increasing row index.
pub fn build_immigration_fact(
    immigration: &DataFrame,
    country_dim: &DataFrame,
    airport_dim: &DataFrame,
    demographics_dim: &DataFrame,
) -> Result<DataFrame> {
    let birth_countries = country_dim.clone().lazy().select([
        col("country_id").alias("birth_country_id"),
        col("country_name")
            .str()
            .to_lowercase()
            .alias("birth_country_key"),
    ]);
    let res_countries = country_dim.clone().lazy().select([
        col("country_id").alias("res_country_id"),
        col("country_name")
            .str()
            .to_lowercase()
            .alias("res_country_key"),
    ]);
    let airports = airport_dim
        .clone()
        .lazy()
        .select([col("airport_id"), col("airport_code")]);
    let states = demographics_dim
        .clone()
        .lazy()
        .select([col("state_id"), col("state_code")]);

    let fact = immigration
        .clone()
        .lazy()
        .with_columns([
            col("i94cit_value")
                .str()
                .to_lowercase()
                .alias("birth_country_key"),
            col("i94cit_value")
                .str()
                .to_lowercase()
                .alias("res_country_key"),
        ])
        .join(
            birth_countries,
            [col("birth_country_key")],
            [col("birth_country_key")],
            JoinArgs::new(JoinType::Left),
        )
        .join(
            res_countries,
            [col("res_country_key")],
            [col("res_country_key")],
            JoinArgs::new(JoinType::Left),
        )
        .join(
            airports,
            [col("i94port")],
            [col("airport_code")],
            JoinArgs::new(JoinType::Left),
        )
        .join(
            states,
            [col("i94addr")],
            [col("state_code")],
            JoinArgs::new(JoinType::Left),
        )
        .select([
            col("birth_country_id"),
            col("res_country_id"),
            col("airport_id"),
            col("state_id"),
            col("arrdate").alias("arrival_date"),
            col("depdate").alias("departure_date"),
            col("dtadfile").alias("created_date"),
            col("dtaddto").alias("admission_date"),
            col("i94visa").alias("visa_type_code"),
            col("i94visa_value").alias("visa_type_desc"),
            col("visapost").alias("visa_post"),
            col("i94mode").alias("arrival_mode_code"),
            col("i94mode_value").alias("arrival_mode_desc"),
            col("i94bir").alias("age"),
            col("entdepa").alias("arrival_flag"),
            col("entdepd").alias("departure_flag"),
            col("matflag").alias("match_flag"),
            col("biryear").alias("birth_year"),
            col("admnum").alias("admission_num"),
            col("fltno").alias("flight_num"),
            col("airline").alias("airline_code"),
        ])
        .with_row_index("record_id", Some(0))
        .collect()
        .context("build immigration_fact")?;

    debug!(rows = fact.height(), "immigration fact assembled");
    Ok(fact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn enriched_immigration() -> DataFrame {
        DataFrame::new(vec![
            Column::new("cicid".into(), [42i64, 43, 44]),
            Column::new("i94cit_value".into(), [Some("GERMANY"), Some("ATLANTIS"), None]),
            Column::new("i94port".into(), [Some("JFK"), Some("ZZZ"), None]),
            Column::new("i94addr".into(), [Some("NY"), Some("ny"), None]),
            Column::new("arrdate".into(), [Some(0i32), None, None])
                .cast(&DataType::Date)
                .unwrap(),
            Column::new("depdate".into(), [None::<i32>, None, None])
                .cast(&DataType::Date)
                .unwrap(),
            Column::new("dtadfile".into(), [Some("20160429"), None, None]),
            Column::new("dtaddto".into(), [Some("10292016"), None, None]),
            Column::new("i94visa".into(), [Some(2i64), Some(1), None]),
            Column::new("i94visa_value".into(), [Some("Pleasure"), Some("Business"), None]),
            Column::new("visapost".into(), [Some("MUN"), None, None]),
            Column::new("i94mode".into(), [Some(1i64), None, None]),
            Column::new("i94mode_value".into(), [Some("Air"), None, None]),
            Column::new("i94bir".into(), [Some(29i64), None, None]),
            Column::new("entdepa".into(), [Some("G"), None, None]),
            Column::new("entdepd".into(), [Some("O"), None, None]),
            Column::new("matflag".into(), [Some("M"), None, None]),
            Column::new("biryear".into(), [Some(1987i64), None, None]),
            Column::new("admnum".into(), [Some(666_643_185i64), None, None]),
            Column::new("fltno".into(), [Some("00011"), None, None]),
            Column::new("airline".into(), [Some("LH"), None, None]),
        ])
        .unwrap()
    }

    fn country_dim() -> DataFrame {
        DataFrame::new(vec![
            Column::new("country_id".into(), [1u32, 2]),
            Column::new("country_name".into(), ["France", "Germany"]),
        ])
        .unwrap()
    }

    fn airport_dim() -> DataFrame {
        DataFrame::new(vec![
            Column::new("airport_id".into(), [1u32, 2]),
            Column::new("airport_code".into(), ["ABQ", "JFK"]),
        ])
        .unwrap()
    }

    fn demographics_dim() -> DataFrame {
        DataFrame::new(vec![
            Column::new("state_id".into(), [1u32]),
            Column::new("state_code".into(), ["NY"]),
        ])
        .unwrap()
    }

    #[test]
    fn left_joins_never_drop_rows() {
        let fact = build_immigration_fact(
            &enriched_immigration(),
            &country_dim(),
            &airport_dim(),
            &demographics_dim(),
        )
        .unwrap();
        assert_eq!(fact.height(), 3);
    }

    #[test]
    fn matched_keys_resolve_and_misses_are_null() {
        let fact = build_immigration_fact(
            &enriched_immigration(),
            &country_dim(),
            &airport_dim(),
            &demographics_dim(),
        )
        .unwrap();

        let birth = fact.column("birth_country_id").unwrap().u32().unwrap();
        // "GERMANY" matches "Germany" case-insensitively.
        assert_eq!(birth.get(0), Some(2));
        assert_eq!(birth.get(1), None); // unknown country
        assert_eq!(birth.get(2), None); // null value

        // Residence id mirrors the citizenship-keyed join.
        let res = fact.column("res_country_id").unwrap().u32().unwrap();
        assert_eq!(res.get(0), Some(2));

        let airport = fact.column("airport_id").unwrap().u32().unwrap();
        assert_eq!(airport.get(0), Some(2));
        assert_eq!(airport.get(1), None);

        // State join is case-sensitive: "ny" does not match "NY".
        let state = fact.column("state_id").unwrap().u32().unwrap();
        assert_eq!(state.get(0), Some(1));
        assert_eq!(state.get(1), None);
    }

    #[test]
    fn record_ids_are_unique_and_monotonic() {
        let fact = build_immigration_fact(
            &enriched_immigration(),
            &country_dim(),
            &airport_dim(),
            &demographics_dim(),
        )
        .unwrap();
        let ids = fact.column("record_id").unwrap().u32().unwrap();
        let values: Vec<u32> = ids.into_iter().flatten().collect();
        let unique: BTreeSet<u32> = values.iter().copied().collect();
        assert_eq!(unique.len(), fact.height());
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }
}
