//! Code enrichment: descriptive value columns for coded fields.
//!
//! Each coded column gets a sibling `<name>_value` column holding the
//! decoded label. A code with no entry in its lookup table yields a
//! null description; the row is always retained.

use anyhow::Result;
use polars::prelude::{DataFrame, IntoSeries, Series, StringChunkedBuilder};
use tracing::debug;

use i94_common::code_key;

use crate::labels::{CodeBook, CodeLookup};

/// Adds the five description columns to the cleaned immigration frame.
///
/// Both `i94cit_value` and `i94res_value` resolve against the shared
/// country table; `i94addr_value` resolves against the state table.
pub fn add_code_descriptions(df: &mut DataFrame, book: &CodeBook) -> Result<()> {
    apply_lookup(df, "i94cit", "i94cit_value", &book.countries)?;
    apply_lookup(df, "i94res", "i94res_value", &book.countries)?;
    apply_lookup(df, "i94mode", "i94mode_value", &book.travel_modes)?;
    apply_lookup(df, "i94addr", "i94addr_value", &book.states)?;
    apply_lookup(df, "i94visa", "i94visa_value", &book.visa_categories)?;
    debug!(rows = df.height(), "code descriptions added");
    Ok(())
}

fn apply_lookup(
    df: &mut DataFrame,
    source: &str,
    target: &str,
    lookup: &CodeLookup,
) -> Result<()> {
    let values: Series = {
        let Ok(column) = df.column(source) else {
            // Source column absent; nothing to describe.
            return Ok(());
        };
        let mut builder = StringChunkedBuilder::new(target.into(), df.height());
        for idx in 0..df.height() {
            let value = column.get(idx)?;
            match code_key(&value).and_then(|key| lookup.get(&key)) {
                Some(label) => builder.append_value(label),
                None => builder.append_null(),
            }
        }
        builder.finish().into_series()
    };
    df.with_column(values)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::CodeBook;
    use polars::prelude::Column;

    fn test_book() -> CodeBook {
        CodeBook {
            countries: CodeLookup::from_pairs([("103", "GERMANY"), ("104", "FRANCE")]),
            travel_modes: CodeLookup::from_pairs([("1", "Air")]),
            states: CodeLookup::from_pairs([("NY", "NEW YORK")]),
            visa_categories: crate::labels::visa_category_lookup(),
        }
    }

    #[test]
    fn numeric_codes_resolve_to_labels() {
        let mut df = DataFrame::new(vec![
            Column::new("i94cit".into(), [Some(103i64), Some(104), None]),
            Column::new("i94res".into(), [Some(104i64), Some(103), Some(103)]),
            Column::new("i94mode".into(), [Some(1i64), Some(9), None]),
            Column::new("i94addr".into(), [Some("NY"), Some("ZZ"), None]),
            Column::new("i94visa".into(), [Some(2i64), Some(3), None]),
        ])
        .unwrap();
        add_code_descriptions(&mut df, &test_book()).unwrap();

        let cit = df.column("i94cit_value").unwrap().str().unwrap();
        assert_eq!(cit.get(0), Some("GERMANY"));
        assert_eq!(cit.get(1), Some("FRANCE"));
        assert_eq!(cit.get(2), None);

        let res = df.column("i94res_value").unwrap().str().unwrap();
        assert_eq!(res.get(0), Some("FRANCE"));

        let visa = df.column("i94visa_value").unwrap().str().unwrap();
        assert_eq!(visa.get(0), Some("Pleasure"));
        assert_eq!(visa.get(1), Some("Student"));
    }

    #[test]
    fn lookup_misses_are_null_and_rows_survive() {
        let mut df = DataFrame::new(vec![Column::new(
            "i94mode".into(),
            [Some(42i64), None],
        )])
        .unwrap();
        add_code_descriptions(&mut df, &test_book()).unwrap();
        assert_eq!(df.height(), 2);
        let mode = df.column("i94mode_value").unwrap().str().unwrap();
        assert_eq!(mode.get(0), None);
        assert_eq!(mode.get(1), None);
    }

    #[test]
    fn absent_source_columns_are_skipped() {
        let mut df =
            DataFrame::new(vec![Column::new("cicid".into(), [1i64])]).unwrap();
        add_code_descriptions(&mut df, &test_book()).unwrap();
        assert!(df.column("i94cit_value").is_err());
    }

    #[test]
    fn float_coded_columns_resolve_via_canonical_keys() {
        // Codes straight out of a SAS export arrive as floats.
        let mut df = DataFrame::new(vec![Column::new(
            "i94cit".into(),
            [Some(103.0f64)],
        )])
        .unwrap();
        add_code_descriptions(&mut df, &test_book()).unwrap();
        let cit = df.column("i94cit_value").unwrap().str().unwrap();
        assert_eq!(cit.get(0), Some("GERMANY"));
    }
}
