//! Grid sources and the injectable snapshot cache.
//!
//! # Responsibility
//! - Define how month grids are fetched (`SheetSource`) and memoized
//!   (`GridCache`), keyed by `SheetKey`.
//! - Turn a fetched grid into a `MonthSheet` (`load_month_sheet`).
//!
//! # Invariants
//! - Caching is always explicit: nothing here is process-wide.
//! - Cache failures degrade to a fetch; they never fail a load.
//! - Source failures are surfaced as-is and never retried.

use crate::model::grid::{MonthSheet, RawGrid, SheetKey};
use crate::parse::locator::{locate_month_sheet, LocateError};
use log::{info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type SourceResult<T> = Result<T, SourceError>;
pub type CacheResult<T> = Result<T, CacheError>;

/// Failure to produce the raw grid of a month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// No workbook is configured for the year.
    UnconfiguredYear(i32),
    /// Month outside `1..=12` or without worksheet code.
    InvalidMonth(u32),
    /// The workbook has no worksheet with the month code.
    WorksheetMissing { key: SheetKey, worksheet: String },
    /// Transport or file-format failure reported by the backend.
    Backend(String),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnconfiguredYear(year) => write!(f, "no workbook configured for year {year}"),
            Self::InvalidMonth(month) => write!(f, "no worksheet code for month {month}"),
            Self::WorksheetMissing { key, worksheet } => {
                write!(f, "worksheet `{worksheet}` not found for {key}")
            }
            Self::Backend(message) => write!(f, "sheet source failure: {message}"),
        }
    }
}

impl Error for SourceError {}

/// Snapshot cache backend failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheError(pub String);

impl Display for CacheError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "grid cache failure: {}", self.0)
    }
}

impl Error for CacheError {}

/// Failure to load a located month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    Source(SourceError),
    Locate(LocateError),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source(err) => write!(f, "{err}"),
            Self::Locate(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Source(err) => Some(err),
            Self::Locate(err) => Some(err),
        }
    }
}

impl From<SourceError> for LoadError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

impl From<LocateError> for LoadError {
    fn from(value: LocateError) -> Self {
        Self::Locate(value)
    }
}

/// Provider of raw month grids.
pub trait SheetSource {
    fn fetch_grid(&self, key: SheetKey) -> SourceResult<RawGrid>;
}

/// Memo of fetched grids keyed by (year, month).
pub trait GridCache {
    fn get(&self, key: SheetKey) -> CacheResult<Option<RawGrid>>;
    fn put(&mut self, key: SheetKey, grid: &RawGrid) -> CacheResult<()>;
    fn invalidate(&mut self, key: SheetKey) -> CacheResult<()>;
    fn clear(&mut self) -> CacheResult<()>;
}

/// In-memory `GridCache`.
#[derive(Debug, Clone, Default)]
pub struct MemoryGridCache {
    grids: BTreeMap<SheetKey, RawGrid>,
}

impl MemoryGridCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }
}

impl GridCache for MemoryGridCache {
    fn get(&self, key: SheetKey) -> CacheResult<Option<RawGrid>> {
        Ok(self.grids.get(&key).cloned())
    }

    fn put(&mut self, key: SheetKey, grid: &RawGrid) -> CacheResult<()> {
        self.grids.insert(key, grid.clone());
        Ok(())
    }

    fn invalidate(&mut self, key: SheetKey) -> CacheResult<()> {
        self.grids.remove(&key);
        Ok(())
    }

    fn clear(&mut self) -> CacheResult<()> {
        self.grids.clear();
        Ok(())
    }
}

/// Source wrapper that consults a cache before fetching.
pub struct CachedSheetSource<S: SheetSource, C: GridCache> {
    source: S,
    cache: C,
}

impl<S: SheetSource, C: GridCache> CachedSheetSource<S, C> {
    pub fn new(source: S, cache: C) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Cache handle for caller-controlled invalidation.
    pub fn cache_mut(&mut self) -> &mut C {
        &mut self.cache
    }

    /// Returns the cached grid for `key`, fetching and storing it on a miss.
    pub fn fetch(&mut self, key: SheetKey) -> SourceResult<RawGrid> {
        match self.cache.get(key) {
            Ok(Some(grid)) => {
                info!("event=grid_fetch module=source status=ok cache=hit key={key}");
                return Ok(grid);
            }
            Ok(None) => {}
            Err(err) => {
                warn!("event=grid_fetch module=source status=degraded cache=error key={key} error={err}");
            }
        }

        let grid = self.source.fetch_grid(key)?;
        if let Err(err) = self.cache.put(key, &grid) {
            warn!("event=grid_cache_put module=source status=error key={key} error={err}");
        }
        info!(
            "event=grid_fetch module=source status=ok cache=miss key={key} rows={}",
            grid.row_count()
        );
        Ok(grid)
    }
}

impl<S: SheetSource, C: GridCache> SheetSource for std::cell::RefCell<CachedSheetSource<S, C>> {
    fn fetch_grid(&self, key: SheetKey) -> SourceResult<RawGrid> {
        self.borrow_mut().fetch(key)
    }
}

/// Fetches and locates the month identified by `key`.
///
/// # Errors
/// - `LoadError::Source` when the grid cannot be fetched.
/// - `LoadError::Locate` when the grid has no recognizable day header.
pub fn load_month_sheet<S: SheetSource + ?Sized>(
    source: &S,
    key: SheetKey,
) -> Result<MonthSheet, LoadError> {
    let started_at = Instant::now();
    let result = source
        .fetch_grid(key)
        .map_err(LoadError::from)
        .and_then(|grid| locate_month_sheet(grid).map_err(LoadError::from));

    match &result {
        Ok(sheet) => info!(
            "event=month_load module=source status=ok key={key} duration_ms={} people={}",
            started_at.elapsed().as_millis(),
            sheet.person_names().len()
        ),
        Err(err) => warn!(
            "event=month_load module=source status=error key={key} duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        ),
    }
    result
}
