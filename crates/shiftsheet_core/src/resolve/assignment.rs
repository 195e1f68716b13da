//! Assignment lookup for one person and one day.

use crate::model::grid::MonthSheet;
use crate::parse::name::normalize_name;

/// Cell value that marks a free day.
const FREE_CELL: &str = "D";

/// Returns the trimmed assignment code, or `""` when the day is free.
///
/// Unknown people and days also read as free.
pub fn get_assignment(sheet: &MonthSheet, person: &str, day: u32) -> String {
    let (Some(row), Some(col)) = (
        sheet.row_for_normalized(&normalize_name(person)),
        sheet.column_for_day(day),
    ) else {
        return String::new();
    };

    let value = sheet.grid().cell(row, col).trim();
    if value == FREE_CELL {
        return String::new();
    }
    value.to_string()
}
