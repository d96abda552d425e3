use std::collections::{HashMap, HashSet};

use crate::{errors::ParseError, inference::parse_cell, types::Cell};

/// An immutable, typed, row-oriented dataset.
///
/// Every row holds exactly one cell per header column, in header order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Box<[Cell]>>,
}

impl Table {
    /// Build a table from already typed rows, checking the header and row shape.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self, ParseError> {
        let index = build_index(&columns)?;
        let width = columns.len();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                if row.len() != width {
                    Err(ParseError::Malformed(format!(
                        "row {} has {} field(s), expected {}",
                        i,
                        row.len(),
                        width
                    )))
                } else {
                    Ok(row.into_boxed_slice())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            columns,
            index,
            rows,
        })
    }

    /// Build a table from raw strings, inferring each cell.
    pub fn from_raw<S: AsRef<str>>(columns: &[&str], rows: &[Vec<S>]) -> Result<Self, ParseError> {
        let typed = rows
            .iter()
            .map(|row| row.iter().map(|raw| parse_cell(raw.as_ref())).collect())
            .collect();
        Self::new(columns.iter().map(|c| c.to_string()).collect(), typed)
    }

    /// Reject an empty header or repeated column names.
    pub(crate) fn check_header(columns: &[String]) -> Result<(), ParseError> {
        build_index(columns).map(|_| ())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn row(&self, i: usize) -> Option<&[Cell]> {
        self.rows.get(i).map(|r| r.as_ref())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.rows.iter().map(|r| r.as_ref())
    }

    /// Cells of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Cell> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |r| &r[idx]))
    }

    /// A copy of this table with rows in reverse order.
    #[cfg(test)]
    pub(crate) fn reversed(&self) -> Self {
        let mut rows = self.rows.clone();
        rows.reverse();
        Self {
            columns: self.columns.clone(),
            index: self.index.clone(),
            rows,
        }
    }

    /// A copy of this table without the row at `i`.
    #[cfg(test)]
    pub(crate) fn without_row(&self, i: usize) -> Self {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, r)| r.clone())
            .collect();
        Self {
            columns: self.columns.clone(),
            index: self.index.clone(),
            rows,
        }
    }
}

fn build_index(columns: &[String]) -> Result<HashMap<String, usize>, ParseError> {
    if columns.iter().all(|c| c.is_empty()) {
        return Err(ParseError::EmptyHeader);
    }
    let mut seen = HashSet::with_capacity(columns.len());
    for c in columns {
        if !seen.insert(c.as_str()) {
            return Err(ParseError::DuplicateColumn(c.clone()));
        }
    }
    Ok(columns
        .iter()
        .enumerate()
        .map(|(i, c)| (c.clone(), i))
        .collect())
}
