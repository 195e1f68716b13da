//! Core engine for shift-schedule summaries.
//! Parses schedule grids, resolves assignment codes and aggregates weekly
//! per-person summaries. Pure over its inputs: no network or file I/O
//! outside the explicit logging bootstrap.

pub mod calendar;
pub mod holiday;
pub mod logging;
pub mod model;
pub mod parse;
pub mod resolve;
pub mod source;
pub mod summary;

pub use calendar::{weeks_in_month, CalendarError, WeekWindow};
pub use holiday::{merge_holidays, HolidayCalendar, StaticHolidayCalendar};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::day::{
    CodeDescriptor, DayEntry, PersonWeek, SummaryLine, WeeklySummary, FREE_LABEL,
};
pub use model::grid::{MonthSheet, RawGrid, SheetKey};
pub use parse::locator::{locate_month_sheet, LocateError, LocateResult};
pub use parse::name::{is_person_name, normalize_name};
pub use resolve::assignment::get_assignment;
pub use resolve::codes::{describe, organization_of, CodeCatalog, CodeResolver};
pub use source::{
    load_month_sheet, CacheError, CacheResult, CachedSheetSource, GridCache, LoadError,
    MemoryGridCache, SheetSource, SourceError, SourceResult,
};
pub use summary::aggregate::{
    build_summary, build_summary_lines, compress_days, main_organization,
};
pub use summary::weekly::{build_weekly_summary, person_days, summarize_person};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
