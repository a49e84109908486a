use std::collections::BTreeSet;

use rusqlite::Connection;
use wastesched_core::db::migrations::{latest_version, reset_schema, SCHEMA_TABLES};
use wastesched_core::db::{open_db, open_db_in_memory, DbError};
use wastesched_core::{
    EntityKind, NewStreet, RepoError, SqliteStreetRepository, StreetRepository, WasteStore,
    SCHEMA_RELATIONSHIPS,
};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().expect("in-memory database should open");

    assert_eq!(schema_version(&conn), latest_version());
    for table in SCHEMA_TABLES {
        assert_table_exists(&conn, table);
    }
    let foreign_keys: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(foreign_keys, 1);
}

#[test]
fn schema_tables_match_entity_kinds() {
    let from_kinds: BTreeSet<&str> = EntityKind::ALL.iter().map(|kind| kind.table()).collect();
    let declared: BTreeSet<&str> = SCHEMA_TABLES.iter().copied().collect();
    assert_eq!(from_kinds, declared);
}

#[test]
fn declared_foreign_keys_match_relationship_rules() {
    let conn = open_db_in_memory().expect("in-memory database should open");

    let mut from_schema = BTreeSet::new();
    for kind in EntityKind::ALL {
        let mut stmt = conn
            .prepare(&format!("PRAGMA foreign_key_list({});", kind.table()))
            .unwrap();
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>("table")?,
                    row.get::<_, String>("from")?,
                    row.get::<_, String>("to")?,
                    row.get::<_, String>("on_delete")?,
                ))
            })
            .unwrap();
        for row in rows {
            let (parent_table, column, target_column, on_delete) = row.unwrap();
            assert_eq!(target_column, "id");
            from_schema.insert((kind.table().to_string(), column, parent_table, on_delete));
        }
    }

    let from_rules: BTreeSet<_> = SCHEMA_RELATIONSHIPS
        .iter()
        .map(|rule| {
            (
                rule.child.table().to_string(),
                rule.column.to_string(),
                rule.parent.table().to_string(),
                rule.on_delete.as_sql().to_string(),
            )
        })
        .collect();

    assert_eq!(from_schema, from_rules);
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("wastesched.db");

    {
        let conn = open_db(&path).unwrap();
        let repo = SqliteStreetRepository::try_new(&conn).unwrap();
        repo.create_street(&NewStreet::new("Elm St")).unwrap();
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let repo = SqliteStreetRepository::try_new(&conn).unwrap();
    assert_eq!(repo.list_streets().unwrap().len(), 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
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

#[test]
fn opening_database_in_missing_directory_reports_location() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("missing").join("wastesched.sqlite3");

    let err = open_db(&path).expect_err("open should fail without a parent directory");

    assert_eq!(err.code(), "db_open_failed");
    match err {
        DbError::Open { location, .. } => assert_eq!(location, path.display().to_string()),
        other => panic!("expected open error, got {other}"),
    }
}

#[test]
fn repositories_reject_unmigrated_connections() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteStreetRepository::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        RepoError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
}

#[test]
fn store_adopts_migrated_connection_and_rejects_raw_one() {
    let conn = open_db_in_memory().expect("in-memory database should open");
    let store = WasteStore::from_connection(conn).expect("migrated connection should be adopted");
    store
        .streets()
        .create_street(&NewStreet::new("Elm St"))
        .expect("adopted store should accept writes");
    store.close().expect("store should close cleanly");

    let raw = Connection::open_in_memory().expect("raw connection should open");
    let err = WasteStore::from_connection(raw)
        .err()
        .expect("unmigrated connection should be rejected");
    assert_eq!(err.code(), "db_error");
    assert!(matches!(
        err,
        RepoError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
}

#[test]
fn reset_schema_drops_rows_and_restarts_ids() {
    let mut conn = open_db_in_memory().expect("in-memory database should open");
    {
        let repo = SqliteStreetRepository::try_new(&conn).unwrap();
        repo.create_street(&NewStreet::new("Elm St")).unwrap();
        repo.create_street(&NewStreet::new("Oak Ave")).unwrap();
    }

    reset_schema(&mut conn).unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    let repo = SqliteStreetRepository::try_new(&conn).unwrap();
    assert!(repo.list_streets().unwrap().is_empty());
    let street = repo.create_street(&NewStreet::new("Pine Rd")).unwrap();
    assert_eq!(street.id, 1);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
