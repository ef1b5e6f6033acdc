use newsroom_core::db::schema::{COMMENT_TABLE, NEWS_TABLE};
use newsroom_core::{open_db, open_db_in_memory, DbClient, Record};
use rusqlite::types::Value;
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_content_tables() {
    let conn = open_db_in_memory().unwrap();

    assert_table_exists(&conn, NEWS_TABLE);
    assert_table_exists(&conn, COMMENT_TABLE);
    let foreign_keys: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(foreign_keys, 1);
}

#[test]
fn reopening_a_file_keeps_existing_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("newsroom.sqlite3");

    let first = open_db(&path).unwrap();
    first
        .execute_batch(
            "INSERT INTO news (title, body, createdAt)
             VALUES ('Kept', 'Across opens', '2024-01-01 00:00:00');",
        )
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    let rows = second.select("SELECT * FROM news", &[]).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].text("title").as_deref(), Some("Kept"));
}

#[test]
fn select_returns_columns_in_select_order() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO comment (id, newsId, body, createdAt)
         VALUES (10, '1', 'Nice!', '2024-01-01 00:00:00');",
    )
    .unwrap();

    let rows = conn
        .select(
            "SELECT id, body, updatedAt FROM comment WHERE newsId = ?",
            &[Value::Text("1".to_string())],
        )
        .unwrap();

    let expected = Record::new()
        .with("id", 10_i64)
        .with("body", "Nice!".to_string())
        .with("updatedAt", Value::Null);
    assert_eq!(rows, vec![expected]);
}

#[test]
fn execute_and_last_insert_id_track_generated_ids() {
    let conn = open_db_in_memory().unwrap();

    let changed = DbClient::execute(
        &conn,
        "INSERT INTO news (title, body, createdAt) VALUES (?, ?, ?)",
        &[
            Value::Text("t".to_string()),
            Value::Text("b".to_string()),
            Value::Text("2024-01-01 00:00:00".to_string()),
        ],
    )
    .unwrap();

    assert_eq!(changed, 1);
    assert_eq!(conn.last_insert_id().unwrap(), "1");
}

#[test]
fn rollback_discards_uncommitted_writes() {
    let conn = open_db_in_memory().unwrap();

    conn.begin().unwrap();
    conn.execute_batch(
        "INSERT INTO news (title, body, createdAt) VALUES ('t', 'b', '2024-01-01 00:00:00');",
    )
    .unwrap();
    conn.rollback().unwrap();

    assert!(conn.select("SELECT * FROM news", &[]).unwrap().is_empty());
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
