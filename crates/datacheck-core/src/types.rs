use std::{cmp::Ordering, fmt};

/// Kind of a single cell, decided once at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Null,
    Integer,
    Float,
    Text,
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CellKind::Null => "Null",
            CellKind::Integer => "Integer",
            CellKind::Float => "Float",
            CellKind::Text => "Text",
        };
        f.write_str(s)
    }
}

/// A typed value within a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Null => CellKind::Null,
            Cell::Integer(_) => CellKind::Integer,
            Cell::Float(_) => CellKind::Float,
            Cell::Text(_) => CellKind::Text,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Integer(_) | Cell::Float(_))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Integer(i) => Some(*i as f64),
            Cell::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Ordering used by sort checks.
    ///
    /// Numbers compare numerically across `Integer`/`Float`, text compares by
    /// code point, and numbers sort before text. `Null` has no position and
    /// yields `None`, as does a NaN operand.
    pub fn compare(&self, other: &Cell) -> Option<Ordering> {
        match (self, other) {
            (Cell::Null, _) | (_, Cell::Null) => None,
            (Cell::Integer(a), Cell::Integer(b)) => Some(a.cmp(b)),
            (Cell::Text(a), Cell::Text(b)) => Some(a.as_str().cmp(b.as_str())),
            (Cell::Text(_), _) => Some(Ordering::Greater),
            (_, Cell::Text(_)) => Some(Ordering::Less),
            (a, b) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        }
    }

    /// Key used for row equality in duplicate detection.
    ///
    /// Numeric equality applies within one numeric kind only, so `3` and `3.0`
    /// stay distinct while `3.0` and `3.00` collapse.
    pub fn key(&self) -> CellKey<'_> {
        match self {
            Cell::Null => CellKey::Null,
            Cell::Integer(i) => CellKey::Integer(*i),
            Cell::Float(f) => CellKey::Float(canonical_bits(*f)),
            Cell::Text(s) => CellKey::Text(s.as_str()),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Cell::Null => serde_json::Value::Null,
            Cell::Integer(i) => serde_json::Value::from(*i),
            Cell::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(f.to_string())),
            Cell::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => f.write_str("NULL"),
            Cell::Integer(i) => write!(f, "{}", i),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKey<'a> {
    Null,
    Integer(i64),
    Float(u64),
    Text(&'a str),
}

fn canonical_bits(f: f64) -> u64 {
    if f == 0.0 {
        0.0f64.to_bits()
    } else if f.is_nan() {
        f64::NAN.to_bits()
    } else {
        f.to_bits()
    }
}
