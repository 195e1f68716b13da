//! Day-header and people-row location inside an unlabeled grid.
//!
//! # Responsibility
//! - Find the row that carries the day numbers of the month.
//! - Index day → column and normalized person → row.
//!
//! # Invariants
//! - Only the first `HEADER_SCAN_ROWS` rows are considered as header.
//! - Day and name columns start at fixed offsets (`FIRST_DAY_COLUMN`,
//!   `NAME_COLUMN`); row positions are discovered.
//! - Later duplicates win for both day columns and person rows.

use crate::model::grid::{MonthSheet, RawGrid};
use crate::parse::name::{is_person_name, normalize_name};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

const HEADER_SCAN_ROWS: usize = 10;
const MIN_HEADER_DAY_CELLS: usize = 5;
const FIRST_DAY_COLUMN: usize = 2;
const NAME_COLUMN: usize = 1;
/// People start one spacer row below the header.
const PEOPLE_ROW_OFFSET: usize = 2;
const PEOPLE_ROW_LIMIT: usize = 82;

pub type LocateResult<T> = Result<T, LocateError>;

/// Failure to recognize the structure of a month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    /// No row among the first rows carries enough day numbers.
    HeaderRowNotFound { scanned_rows: usize },
}

impl Display for LocateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HeaderRowNotFound { scanned_rows } => write!(
                f,
                "day header row (1..31) not found in the first {scanned_rows} rows"
            ),
        }
    }
}

impl Error for LocateError {}

/// Builds the month view of `grid`.
///
/// # Errors
/// - `LocateError::HeaderRowNotFound` when no header row is recognized.
pub fn locate_month_sheet(grid: RawGrid) -> LocateResult<MonthSheet> {
    let header_row = match locate_header_row(&grid) {
        Ok(row) => row,
        Err(err) => {
            warn!(
                "event=month_sheet_located module=locator status=error rows={} error_code=header_not_found",
                grid.row_count()
            );
            return Err(err);
        }
    };
    let day_columns = build_day_columns(&grid, header_row);
    let (person_rows, person_names) = build_person_rows(&grid, header_row);

    debug!(
        "event=month_sheet_located module=locator status=ok header_row={} days={} people={} unique_people={}",
        header_row,
        day_columns.len(),
        person_names.len(),
        person_rows.len()
    );

    Ok(MonthSheet::new(
        grid,
        header_row,
        day_columns,
        person_rows,
        person_names,
    ))
}

/// Returns the first row, among the first ten, holding at least five
/// all-digit cells from column 2 onward.
pub fn locate_header_row(grid: &RawGrid) -> LocateResult<usize> {
    let scanned_rows = grid.row_count().min(HEADER_SCAN_ROWS);
    (0..scanned_rows)
        .find(|&row| {
            grid.row(row)
                .iter()
                .skip(FIRST_DAY_COLUMN)
                .filter(|cell| is_all_digits(cell.trim()))
                .count()
                >= MIN_HEADER_DAY_CELLS
        })
        .ok_or(LocateError::HeaderRowNotFound { scanned_rows })
}

/// Maps day numbers in the header row to their column index.
///
/// Values outside `1..=31` are ignored; a repeated day keeps the rightmost column.
pub fn build_day_columns(grid: &RawGrid, header_row: usize) -> BTreeMap<u32, usize> {
    let mut day_columns = BTreeMap::new();
    for (col, cell) in grid.row(header_row).iter().enumerate().skip(FIRST_DAY_COLUMN) {
        let value = cell.trim();
        if !is_all_digits(value) {
            continue;
        }
        match value.parse::<u32>() {
            Ok(day) if (1..=31).contains(&day) => {
                day_columns.insert(day, col);
            }
            _ => {}
        }
    }
    day_columns
}

/// Collects the people listed below the header.
///
/// Returns the normalized-name index (last row wins) and the trimmed names
/// in scan order.
pub fn build_person_rows(
    grid: &RawGrid,
    header_row: usize,
) -> (BTreeMap<String, usize>, Vec<String>) {
    let mut person_rows = BTreeMap::new();
    let mut person_names = Vec::new();

    let last_row = grid.row_count().min(PEOPLE_ROW_LIMIT);
    for row in (header_row + PEOPLE_ROW_OFFSET)..last_row {
        let name = grid.cell(row, NAME_COLUMN).trim();
        if name.is_empty() || !is_person_name(name) {
            continue;
        }
        person_names.push(name.to_string());
        person_rows.insert(normalize_name(name), row);
    }

    (person_rows, person_names)
}

fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::{build_day_columns, locate_header_row, LocateError};
    use crate::model::grid::RawGrid;

    #[test]
    fn header_needs_five_digit_cells_after_column_two() {
        let grid = RawGrid::from_rows(vec![
            vec!["1", "2", "3", "4", "x", "x", "x", "x"],
            vec!["", "", "1", "2", "3", "4", "5"],
        ]);
        assert_eq!(locate_header_row(&grid).unwrap(), 1);
    }

    #[test]
    fn header_outside_scan_window_is_not_found() {
        let mut rows: Vec<Vec<String>> = vec![vec![String::new(); 8]; 10];
        rows.push(
            ["", "", "1", "2", "3", "4", "5"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        let err = locate_header_row(&RawGrid::new(rows)).unwrap_err();
        assert_eq!(err, LocateError::HeaderRowNotFound { scanned_rows: 10 });
    }

    #[test]
    fn header_on_last_scanned_row_is_found() {
        let mut rows: Vec<Vec<String>> = vec![vec![String::new(); 8]; 9];
        rows.push(
            ["", "", "1", "2", "3", "4", "5"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        assert_eq!(locate_header_row(&RawGrid::new(rows)).unwrap(), 9);
    }

    #[test]
    fn repeated_day_keeps_rightmost_column_and_skips_out_of_range() {
        let grid = RawGrid::from_rows(vec![vec!["", "", " 1 ", "2", "0", "45", "1", "x"]]);
        let days = build_day_columns(&grid, 0);
        assert_eq!(days.get(&1), Some(&6));
        assert_eq!(days.get(&2), Some(&3));
        assert_eq!(days.len(), 2);
    }
}
