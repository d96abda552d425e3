//! Per-cell type inference.
//!
//! Every raw value is classified on its own: a column holding `"3"`, `"4.5"`
//! and `""` yields `Integer`, `Float` and `Null` cells. No column-wide
//! unification happens, so a single stray value in a numeric column becomes
//! `Text` without any schema anomaly being raised.

use arrow_array::{Array, StringArray};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{Cell, CellKind};

static INTEGER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("integer pattern is valid"));

static FLOAT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?$")
        .expect("float pattern is valid")
});

/// Classify a raw string without converting it.
pub fn infer_cell_type(raw: &str) -> CellKind {
    if raw.is_empty() {
        CellKind::Null
    } else if INTEGER_PATTERN.is_match(raw) {
        CellKind::Integer
    } else if FLOAT_PATTERN.is_match(raw) {
        CellKind::Float
    } else {
        CellKind::Text
    }
}

/// Classify and convert a raw string into a [`Cell`].
///
/// Integers that overflow `i64` are kept as `Float`.
pub fn parse_cell(raw: &str) -> Cell {
    match infer_cell_type(raw) {
        CellKind::Null => Cell::Null,
        CellKind::Integer => match raw.parse::<i64>() {
            Ok(i) => Cell::Integer(i),
            Err(_) => float_or_text(raw),
        },
        CellKind::Float => float_or_text(raw),
        CellKind::Text => Cell::Text(raw.to_string()),
    }
}

fn float_or_text(raw: &str) -> Cell {
    match raw.parse::<f64>() {
        Ok(f) => Cell::Float(f),
        Err(_) => Cell::Text(raw.to_string()),
    }
}

/// Convert a column of raw strings; Arrow nulls (empty fields) become `Null`.
pub fn parse_column(array: &StringArray) -> Vec<Cell> {
    (0..array.len())
        .map(|i| {
            if array.is_null(i) {
                Cell::Null
            } else {
                parse_cell(array.value(i))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_null() {
        assert_eq!(infer_cell_type(""), CellKind::Null);
    }

    #[test]
    fn test_integers() {
        for raw in ["0", "42", "-7", "+15", "007"] {
            assert_eq!(infer_cell_type(raw), CellKind::Integer, "{raw}");
        }
    }

    #[test]
    fn test_floats() {
        for raw in ["4.5", "-0.25", "3.", ".5", "1e5", "2.5E-3", "+1.0e+2"] {
            assert_eq!(infer_cell_type(raw), CellKind::Float, "{raw}");
        }
    }

    #[test]
    fn test_text() {
        for raw in ["abc", "1.2.3", " 3", "3 ", "1e", "-", "NaN", "inf", "12a"] {
            assert_eq!(infer_cell_type(raw), CellKind::Text, "{raw}");
        }
    }

    #[test]
    fn test_parse_cell_values() {
        assert_eq!(parse_cell("42"), Cell::Integer(42));
        assert_eq!(parse_cell("4.5"), Cell::Float(4.5));
        assert_eq!(parse_cell("active"), Cell::Text("active".to_string()));
        assert_eq!(parse_cell(""), Cell::Null);
    }

    #[test]
    fn test_integer_overflow_falls_back_to_float() {
        assert_eq!(
            parse_cell("99999999999999999999"),
            Cell::Float(99999999999999999999.0)
        );
    }

    #[test]
    fn test_parse_column_mixed_kinds() {
        let array = StringArray::from(vec![Some("3"), Some("4.5"), None, Some("x")]);
        let cells = parse_column(&array);
        let kinds: Vec<CellKind> = cells.iter().map(Cell::kind).collect();
        assert_eq!(
            kinds,
            vec![
                CellKind::Integer,
                CellKind::Float,
                CellKind::Null,
                CellKind::Text
            ]
        );
    }
}
