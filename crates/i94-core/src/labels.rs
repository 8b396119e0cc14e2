//! Reference label decoder.
//!
//! The SAS label description file holds one block per coded domain.
//! Each block starts at a distinctive marker (e.g. `i94cntyl`), runs to
//! the next `;`, and lists one `'code' = 'label'` entry per line after a
//! header line. A missing marker is a fatal configuration error; a
//! malformed entry line is skipped.

use std::collections::BTreeMap;

use thiserror::Error;

/// Marker preceding the citizenship/residence country block.
pub const COUNTRY_MARKER: &str = "i94cntyl";
/// Marker preceding the travel mode block.
pub const TRAVEL_MODE_MARKER: &str = "i94model";
/// Marker preceding the US state/territory block.
pub const STATE_MARKER: &str = "i94addrl";

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("label marker `{marker}` not found in reference file")]
    MarkerNotFound { marker: String },
}

/// An immutable code → label mapping for one coded domain.
///
/// Keys are opaque strings; numeric source columns are rendered to
/// canonical key strings before lookup (see `i94_common::code_key`).
#[derive(Debug, Clone, Default)]
pub struct CodeLookup {
    entries: BTreeMap<String, String>,
}

impl CodeLookup {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Decodes the label block introduced by `marker`.
///
/// The block is the text from the marker's first occurrence up to (but
/// not including) the next `;`; a block with no terminator runs to the
/// end of the text. Quote characters are stripped, the header line is
/// skipped, and each remaining line must split on `=` into exactly two
/// parts; other lines are discarded.
pub fn decode_block(content: &str, marker: &str) -> Result<CodeLookup, LabelError> {
    let start = content
        .find(marker)
        .ok_or_else(|| LabelError::MarkerNotFound {
            marker: marker.to_string(),
        })?;
    let block = &content[start..];
    let block = match block.find(';') {
        Some(end) => &block[..end],
        None => block,
    };

    let mut entries = BTreeMap::new();
    for line in block.lines().skip(1) {
        let line = line.replace('\'', "");
        let parts: Vec<&str> = line.split('=').collect();
        if parts.len() != 2 {
            continue;
        }
        entries.insert(parts[0].trim().to_string(), parts[1].trim().to_string());
    }
    Ok(CodeLookup { entries })
}

/// The visa category domain is not present in the reference file in the
/// same delimited format; it is a fixed three-entry table.
pub fn visa_category_lookup() -> CodeLookup {
    CodeLookup::from_pairs([("1", "Business"), ("2", "Pleasure"), ("3", "Student")])
}

/// The four decoded lookup tables, built once per run.
#[derive(Debug, Clone)]
pub struct CodeBook {
    /// Citizenship and residence countries (`i94cit`, `i94res`).
    pub countries: CodeLookup,
    /// Travel modes (`i94mode`).
    pub travel_modes: CodeLookup,
    /// US states and territories (`i94addr`).
    pub states: CodeLookup,
    /// Visa categories (`i94visa`).
    pub visa_categories: CodeLookup,
}

impl CodeBook {
    /// Decodes all file-backed domains from the label text (the caller
    /// strips tabs on read) and attaches the fixed visa table.
    pub fn from_label_text(content: &str) -> Result<Self, LabelError> {
        Ok(Self {
            countries: decode_block(content, COUNTRY_MARKER)?,
            travel_modes: decode_block(content, TRAVEL_MODE_MARKER)?,
            states: decode_block(content, STATE_MARKER)?,
            visa_categories: visa_category_lookup(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_block_parses_quoted_pairs() {
        let content = "value marker\n'1'='Foo'\n'2'='Bar'\n;";
        let lookup = decode_block(content, "marker").unwrap();
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get("1"), Some("Foo"));
        assert_eq!(lookup.get("2"), Some("Bar"));
    }

    #[test]
    fn decode_block_skips_malformed_lines() {
        let content = "value marker\n'1'='Foo'\nthis line has no separator\n'a'='b'='c'\n'2'='Bar'\n;";
        let lookup = decode_block(content, "marker").unwrap();
        // The bare line and the double-equals line are discarded.
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get("2"), Some("Bar"));
    }

    #[test]
    fn decode_block_stops_at_semicolon() {
        let content = "value marker\n'1'='Foo'\n;\n'99'='Should not appear'\n;";
        let lookup = decode_block(content, "marker").unwrap();
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.get("99"), None);
    }

    #[test]
    fn decode_block_without_terminator_runs_to_end() {
        let content = "value marker\n'1'='Foo'";
        let lookup = decode_block(content, "marker").unwrap();
        assert_eq!(lookup.get("1"), Some("Foo"));
    }

    #[test]
    fn missing_marker_is_fatal() {
        let err = decode_block("no blocks here", "i94cntyl").unwrap_err();
        assert!(matches!(err, LabelError::MarkerNotFound { .. }));
    }

    #[test]
    fn visa_lookup_is_fixed() {
        let lookup = visa_category_lookup();
        assert_eq!(lookup.get("1"), Some("Business"));
        assert_eq!(lookup.get("2"), Some("Pleasure"));
        assert_eq!(lookup.get("3"), Some("Student"));
        assert_eq!(lookup.get("4"), None);
    }

    #[test]
    fn code_book_decodes_all_domains() {
        let content = "\
value i94cntyl\n'103'='GERMANY'\n'104'='FRANCE'\n;\n\
value i94model\n'1'='Air'\n'2'='Sea'\n;\n\
value i94addrl\n'NY'='NEW YORK'\n;\n";
        let book = CodeBook::from_label_text(content).unwrap();
        assert_eq!(book.countries.get("103"), Some("GERMANY"));
        assert_eq!(book.travel_modes.get("2"), Some("Sea"));
        assert_eq!(book.states.get("NY"), Some("NEW YORK"));
        assert_eq!(book.visa_categories.get("3"), Some("Student"));
    }
}
