//! Raw schedule grid and the month view derived from it.
//!
//! # Responsibility
//! - Hold the untouched cell strings of one worksheet (`RawGrid`).
//! - Hold the day/person indexes located inside that grid (`MonthSheet`).
//!
//! # Invariants
//! - A `RawGrid` is never mutated after construction.
//! - Every `MonthSheet::day_columns` key is in `1..=31`.
//! - Every `MonthSheet::person_rows` key is a normalized name.
//! - Duplicate normalized names keep the last row scanned.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Immutable, possibly ragged, zero-indexed table of cell strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawGrid {
    rows: Vec<Vec<String>>,
}

impl RawGrid {
    /// Wraps row-major cell values. Rows may have different lengths.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Builds a grid from borrowed string rows.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the cells of one row, or an empty slice when out of range.
    pub fn row(&self, row: usize) -> &[String] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns one cell value; cells outside a ragged row read as `""`.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.row(row).get(col).map(String::as_str).unwrap_or("")
    }
}

/// Located view over one month worksheet.
///
/// Built once by `parse::locator::locate_month_sheet` and only read
/// afterwards, so it can be shared freely across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSheet {
    grid: RawGrid,
    pub(crate) header_row: usize,
    pub(crate) day_columns: BTreeMap<u32, usize>,
    pub(crate) person_rows: BTreeMap<String, usize>,
    pub(crate) person_names: Vec<String>,
}

impl MonthSheet {
    pub(crate) fn new(
        grid: RawGrid,
        header_row: usize,
        day_columns: BTreeMap<u32, usize>,
        person_rows: BTreeMap<String, usize>,
        person_names: Vec<String>,
    ) -> Self {
        Self {
            grid,
            header_row,
            day_columns,
            person_rows,
            person_names,
        }
    }

    /// Grid the indexes point into.
    pub fn grid(&self) -> &RawGrid {
        &self.grid
    }

    /// Row index holding the day numbers.
    pub fn header_row(&self) -> usize {
        self.header_row
    }

    /// Day of month → column index.
    pub fn day_columns(&self) -> &BTreeMap<u32, usize> {
        &self.day_columns
    }

    /// Normalized person name → row index.
    pub fn person_rows(&self) -> &BTreeMap<String, usize> {
        &self.person_rows
    }

    /// Trimmed names in row scan order, duplicates included.
    pub fn person_names(&self) -> &[String] {
        &self.person_names
    }

    pub fn column_for_day(&self, day: u32) -> Option<usize> {
        self.day_columns.get(&day).copied()
    }

    pub fn row_for_normalized(&self, normalized_name: &str) -> Option<usize> {
        self.person_rows.get(normalized_name).copied()
    }

    /// Names sorted lexically with exact duplicates removed.
    ///
    /// Default selection when the caller does not name people explicitly.
    pub fn sorted_people(&self) -> Vec<String> {
        self.person_names
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Worksheet identity: calendar year and month (`1..=12`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SheetKey {
    pub year: i32,
    pub month: u32,
}

impl SheetKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl std::fmt::Display for SheetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::{RawGrid, SheetKey};

    #[test]
    fn cell_reads_empty_outside_ragged_rows() {
        let grid = RawGrid::from_rows(vec![vec!["a", "b"], vec!["c"]]);
        assert_eq!(grid.cell(0, 1), "b");
        assert_eq!(grid.cell(1, 1), "");
        assert_eq!(grid.cell(7, 0), "");
        assert!(grid.row(9).is_empty());
    }

    #[test]
    fn grid_serializes_as_nested_arrays() {
        let grid = RawGrid::from_rows(vec![vec!["x", ""], vec!["1"]]);
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, r#"[["x",""],["1"]]"#);
        let decoded: RawGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, grid);
    }

    #[test]
    fn sheet_key_displays_zero_padded_month() {
        assert_eq!(SheetKey::new(2025, 3).to_string(), "2025-03");
    }
}
