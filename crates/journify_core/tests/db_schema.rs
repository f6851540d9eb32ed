use journify_core::db::schema::SCHEMA_VERSION;
use journify_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_documents_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), SCHEMA_VERSION);
    assert_table_exists(&conn, "documents");
}

#[test]
fn reopening_database_keeps_schema_and_documents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journify.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO documents (key, payload) VALUES ('tasks', '[]');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), SCHEMA_VERSION);
    let payload: String = conn_second
        .query_row("SELECT payload FROM documents WHERE key = 'tasks';", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(payload, "[]");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
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
            assert_eq!(latest_supported, SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0)).unwrap()
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
