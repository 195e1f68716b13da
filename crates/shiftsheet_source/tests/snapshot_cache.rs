use rusqlite::Connection;
use shiftsheet_core::{GridCache, RawGrid, SheetKey};
use shiftsheet_source::db::migrations::{latest_version, schema_version};
use shiftsheet_source::db::{open_db, open_db_in_memory, DbError};
use shiftsheet_source::SqliteGridCache;

fn sample_grid() -> RawGrid {
    RawGrid::from_rows(vec![
        vec!["", "", "1", "2", "3", "4", "5"],
        vec![""],
        vec!["", "Ana Ruiz", "AR", "D", "", "BE ?", "M1"],
    ])
}

#[test]
fn in_memory_database_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'grid_snapshots');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn snapshots_survive_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshots.db");
    let key = SheetKey::new(2025, 3);

    {
        let mut cache = SqliteGridCache::open(&path).unwrap();
        cache.put(key, &sample_grid()).unwrap();
        cache.put(key, &sample_grid()).unwrap();
        assert_eq!(cache.len().unwrap(), 1);
    }

    let mut cache = SqliteGridCache::open(&path).unwrap();
    assert_eq!(cache.get(key).unwrap(), Some(sample_grid()));
    assert_eq!(cache.get(SheetKey::new(2025, 4)).unwrap(), None);

    cache.invalidate(key).unwrap();
    assert_eq!(cache.get(key).unwrap(), None);
}

#[test]
fn clear_removes_every_snapshot() {
    let mut cache = SqliteGridCache::in_memory().unwrap();
    cache.put(SheetKey::new(2025, 1), &sample_grid()).unwrap();
    cache.put(SheetKey::new(2026, 1), &sample_grid()).unwrap();
    cache.clear().unwrap();
    assert_eq!(cache.len().unwrap(), 0);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}
