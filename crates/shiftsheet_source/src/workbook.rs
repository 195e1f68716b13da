//! Spreadsheet workbook source.
//!
//! Reads one worksheet per month from the workbook configured for the year
//! and converts its used range into a `RawGrid` of display strings.

use crate::config::SourceConfig;
use calamine::{open_workbook_auto, Data, Range, Reader};
use log::{error, info};
use shiftsheet_core::{RawGrid, SheetKey, SheetSource, SourceError, SourceResult};
use std::time::Instant;

/// `SheetSource` over local `.xlsx`/`.xls`/`.ods` workbooks.
pub struct WorkbookSheetSource {
    config: SourceConfig,
}

impl WorkbookSheetSource {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }
}

impl SheetSource for WorkbookSheetSource {
    fn fetch_grid(&self, key: SheetKey) -> SourceResult<RawGrid> {
        let target = self.config.worksheet_for(key)?;
        let started_at = Instant::now();

        let mut workbook = open_workbook_auto(&target.workbook).map_err(|err| {
            error!(
                "event=workbook_open module=workbook status=error key={key} error={err}"
            );
            SourceError::Backend(format!("{}: {err}", target.workbook.display()))
        })?;

        if !workbook
            .sheet_names()
            .iter()
            .any(|name| name == &target.worksheet)
        {
            return Err(SourceError::WorksheetMissing {
                key,
                worksheet: target.worksheet,
            });
        }

        let range = workbook
            .worksheet_range(&target.worksheet)
            .map_err(|err| SourceError::Backend(format!("{}: {err}", target.worksheet)))?;
        let grid = range_to_grid(&range);

        info!(
            "event=workbook_read module=workbook status=ok key={key} worksheet={} rows={} duration_ms={}",
            target.worksheet,
            grid.row_count(),
            started_at.elapsed().as_millis()
        );
        Ok(grid)
    }
}

/// Converts a worksheet range into display strings, anchored at `A1`.
///
/// Rows and columns before the used range's start are padded with empty
/// cells so that grid coordinates match the sheet's.
pub fn range_to_grid(range: &Range<Data>) -> RawGrid {
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<String>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![String::new(); start_col as usize];
        cells.extend(row.iter().map(cell_to_string));
        rows.push(cells);
    }
    RawGrid::new(rows)
}

/// Display string of one cell; integral floats lose their decimals.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(n) => n.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => format!("#ERR({e:?})"),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}
