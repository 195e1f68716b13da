//! SQLite-backed grid snapshot cache.
//!
//! # Responsibility
//! - Persist fetched month grids between runs, keyed by (year, month).
//!
//! # Invariants
//! - One snapshot per key; `put` replaces the previous snapshot.
//! - Grids are stored as JSON arrays of rows.

use crate::db::{open_db, open_db_in_memory, DbResult};
use rusqlite::{params, Connection, OptionalExtension};
use shiftsheet_core::{CacheError, CacheResult, GridCache, MemoryGridCache, RawGrid, SheetKey};
use std::path::Path;

/// `GridCache` stored in the `grid_snapshots` table.
pub struct SqliteGridCache {
    conn: Connection,
}

impl SqliteGridCache {
    /// Opens (or creates) the cache database at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    pub fn in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> CacheResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM grid_snapshots;", [], |row| row.get(0))
            .map_err(cache_error)?;
        Ok(count as usize)
    }
}

impl GridCache for SqliteGridCache {
    fn get(&self, key: SheetKey) -> CacheResult<Option<RawGrid>> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT grid_json FROM grid_snapshots WHERE year = ?1 AND month = ?2;",
                params![key.year, key.month],
                |row| row.get(0),
            )
            .optional()
            .map_err(cache_error)?;

        json.map(|value| {
            serde_json::from_str(&value)
                .map_err(|err| CacheError(format!("corrupt snapshot for {key}: {err}")))
        })
        .transpose()
    }

    fn put(&mut self, key: SheetKey, grid: &RawGrid) -> CacheResult<()> {
        let json = serde_json::to_string(grid).map_err(|err| CacheError(err.to_string()))?;
        self.conn
            .execute(
                "INSERT INTO grid_snapshots (year, month, grid_json)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT (year, month) DO UPDATE SET
                    grid_json = excluded.grid_json,
                    fetched_at = (strftime('%s', 'now') * 1000);",
                params![key.year, key.month, json],
            )
            .map_err(cache_error)?;
        Ok(())
    }

    fn invalidate(&mut self, key: SheetKey) -> CacheResult<()> {
        self.conn
            .execute(
                "DELETE FROM grid_snapshots WHERE year = ?1 AND month = ?2;",
                params![key.year, key.month],
            )
            .map_err(cache_error)?;
        Ok(())
    }

    fn clear(&mut self) -> CacheResult<()> {
        self.conn
            .execute("DELETE FROM grid_snapshots;", [])
            .map_err(cache_error)?;
        Ok(())
    }
}

fn cache_error(err: rusqlite::Error) -> CacheError {
    CacheError(err.to_string())
}

/// Cache backend chosen from configuration.
pub enum SnapshotCache {
    Memory(MemoryGridCache),
    Sqlite(SqliteGridCache),
}

impl SnapshotCache {
    /// SQLite cache at `path` when given, in-memory cache otherwise.
    pub fn from_path(path: Option<&Path>) -> DbResult<Self> {
        match path {
            Some(path) => Ok(Self::Sqlite(SqliteGridCache::open(path)?)),
            None => Ok(Self::Memory(MemoryGridCache::new())),
        }
    }
}

impl GridCache for SnapshotCache {
    fn get(&self, key: SheetKey) -> CacheResult<Option<RawGrid>> {
        match self {
            Self::Memory(cache) => cache.get(key),
            Self::Sqlite(cache) => cache.get(key),
        }
    }

    fn put(&mut self, key: SheetKey, grid: &RawGrid) -> CacheResult<()> {
        match self {
            Self::Memory(cache) => cache.put(key, grid),
            Self::Sqlite(cache) => cache.put(key, grid),
        }
    }

    fn invalidate(&mut self, key: SheetKey) -> CacheResult<()> {
        match self {
            Self::Memory(cache) => cache.invalidate(key),
            Self::Sqlite(cache) => cache.invalidate(key),
        }
    }

    fn clear(&mut self) -> CacheResult<()> {
        match self {
            Self::Memory(cache) => cache.clear(),
            Self::Sqlite(cache) => cache.clear(),
        }
    }
}
