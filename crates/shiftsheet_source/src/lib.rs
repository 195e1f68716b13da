//! Grid sources for the schedule core: workbook reading, configuration
//! and the persistent snapshot cache.

pub mod cache;
pub mod config;
pub mod db;
pub mod workbook;

pub use cache::{SnapshotCache, SqliteGridCache};
pub use config::{
    default_month_codes, load_config, parse_config, ConfigError, ConfigResult, SourceConfig,
    WorksheetRef,
};
pub use workbook::WorkbookSheetSource;

use shiftsheet_core::CachedSheetSource;
use std::cell::RefCell;

/// Workbook source behind the configured snapshot cache.
pub type ConfiguredSource = RefCell<CachedSheetSource<WorkbookSheetSource, SnapshotCache>>;

/// Builds the cached workbook source described by `config`.
pub fn configured_source(config: SourceConfig) -> db::DbResult<ConfiguredSource> {
    let cache = SnapshotCache::from_path(config.cache_path().as_deref())?;
    Ok(RefCell::new(CachedSheetSource::new(
        WorkbookSheetSource::new(config),
        cache,
    )))
}
