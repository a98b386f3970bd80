use rusqlite::Connection;
use smallecon_core::db::migrations::{current_version, latest_version};
use smallecon_core::db::{open_db, open_db_in_memory, open_location, DbError, DbLocation};

#[test]
fn in_memory_database_has_every_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(current_version(&conn).unwrap(), latest_version());
    assert_table_exists(&conn, "completed_tasks");
    assert_table_exists(&conn, "events");
    assert_table_exists(&conn, "expenses");
}

#[test]
fn reopening_file_database_keeps_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("smallecon.sqlite3");

    let first = open_db(&path).unwrap();
    first
        .execute("INSERT INTO completed_tasks (task_id) VALUES ('personal-budget');", [])
        .unwrap();
    drop(first);

    let second = open_location(&DbLocation::File(path)).unwrap();
    assert_eq!(current_version(&second).unwrap(), latest_version());
    let count: i64 = second
        .query_row("SELECT COUNT(*) FROM completed_tasks;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

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

#[test]
fn expense_amount_must_be_positive_at_storage_level() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO expenses (uuid, position, expense_date, amount_cents, category, description, status)
         VALUES ('x', 0, '2024-01-01', 0, 'other', 'zero', 'pending');",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn location_from_missing_path_is_memory() {
    assert_eq!(DbLocation::from_optional_path(None), DbLocation::Memory);
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
