//! Polars `AnyValue` utility functions.
//!
//! The warehouse sources arrive with loose types (SAS exports store
//! integer codes as floats, CSV inference can go either way), so the
//! row-level passes all funnel through these conversions.

use polars::prelude::AnyValue;

/// Converts a Polars `AnyValue` to its display string.
///
/// Returns an empty string for `Null` and formats floats without
/// trailing zeros.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use i94_common::any_to_string;
///
/// assert_eq!(any_to_string(&AnyValue::Null), "");
/// assert_eq!(any_to_string(&AnyValue::Int64(103)), "103");
/// assert_eq!(any_to_string(&AnyValue::String("NY")), "NY");
/// ```
pub fn any_to_string(value: &AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(*v)),
        AnyValue::Float64(v) => format_numeric(*v),
        AnyValue::String(s) => (*s).to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// Converts an `AnyValue` to `f64`, returning `None` for null or
/// non-numeric values. Strings are parsed.
pub fn any_to_f64(value: &AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(*v)),
        AnyValue::Int16(v) => Some(f64::from(*v)),
        AnyValue::Int32(v) => Some(f64::from(*v)),
        AnyValue::Int64(v) => Some(*v as f64),
        AnyValue::UInt8(v) => Some(f64::from(*v)),
        AnyValue::UInt16(v) => Some(f64::from(*v)),
        AnyValue::UInt32(v) => Some(f64::from(*v)),
        AnyValue::UInt64(v) => Some(*v as f64),
        AnyValue::Float32(v) => Some(f64::from(*v)),
        AnyValue::Float64(v) => Some(*v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(s),
        _ => None,
    }
}

/// Formats a floating-point number without trailing zeros.
///
/// Used for the demographics `"min - max"` range strings, where
/// `34.0 - 36.50` should render as `34 - 36.5`.
///
/// # Examples
///
/// ```
/// use i94_common::format_numeric;
///
/// assert_eq!(format_numeric(34.0), "34");
/// assert_eq!(format_numeric(36.5), "36.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parses a string as `f64`, returning `None` for empty or invalid input.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Renders a code cell as its canonical lookup key.
///
/// SAS label keys are short digit strings (`"103"`), but the matching
/// immigration columns arrive as floats or integers. Integral numerics
/// render without a fractional part (`103.0` → `"103"`); strings are
/// trimmed; null or non-integral values have no key.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use i94_common::code_key;
///
/// assert_eq!(code_key(&AnyValue::Float64(103.0)), Some("103".to_string()));
/// assert_eq!(code_key(&AnyValue::Int64(2)), Some("2".to_string()));
/// assert_eq!(code_key(&AnyValue::String(" NY ")), Some("NY".to_string()));
/// assert_eq!(code_key(&AnyValue::Null), None);
/// ```
pub fn code_key(value: &AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        AnyValue::StringOwned(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        other => {
            let v = any_to_f64(other)?;
            if v.fract() == 0.0 {
                Some(format!("{}", v as i64))
            } else {
                Some(format_numeric(v))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_to_string_handles_null_and_numerics() {
        assert_eq!(any_to_string(&AnyValue::Null), "");
        assert_eq!(any_to_string(&AnyValue::Int32(42)), "42");
        assert_eq!(any_to_string(&AnyValue::Float64(27.5)), "27.5");
        assert_eq!(any_to_string(&AnyValue::Float64(27.0)), "27");
    }

    #[test]
    fn any_to_f64_parses_strings() {
        assert_eq!(any_to_f64(&AnyValue::String("2.54")), Some(2.54));
        assert_eq!(any_to_f64(&AnyValue::String("not a number")), None);
        assert_eq!(any_to_f64(&AnyValue::Null), None);
    }

    #[test]
    fn format_numeric_trims_trailing_zeros() {
        assert_eq!(format_numeric(34.0), "34");
        assert_eq!(format_numeric(36.50), "36.5");
        assert_eq!(format_numeric(0.0), "0");
    }

    #[test]
    fn code_key_renders_integral_floats_as_digits() {
        assert_eq!(code_key(&AnyValue::Float64(103.0)), Some("103".into()));
        assert_eq!(code_key(&AnyValue::Int64(1)), Some("1".into()));
        assert_eq!(code_key(&AnyValue::String("NY")), Some("NY".into()));
        assert_eq!(code_key(&AnyValue::String("   ")), None);
        assert_eq!(code_key(&AnyValue::Null), None);
    }
}
