use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::env;
use std::fs;
use std::path::PathBuf;

mod common;
use common::cl;

/// Build a database with the pre-partial-payment schema: entries carry a
/// boolean `paid` flag and payments have no note column.
fn setup_legacy_db(name: &str) -> (PathBuf, String) {
    let dir = env::temp_dir().join(format!("{}_crewledger_legacy", name));
    fs::remove_dir_all(&dir).ok();
    fs::create_dir_all(&dir).expect("create legacy dir");

    let db_file = dir.join("ledger.sqlite");
    let db_path = db_file.to_string_lossy().to_string();

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    conn.execute_batch(
        r#"
        CREATE TABLE agents (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT NOT NULL UNIQUE,
            rate_cents INTEGER NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE sites (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        );

        CREATE TABLE entries (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            agent_id     INTEGER NOT NULL REFERENCES agents(id),
            site_id      INTEGER REFERENCES sites(id),
            date         TEXT,
            start_time   TEXT,
            end_time     TEXT,
            hours_milli  INTEGER NOT NULL,
            rate_cents   INTEGER NOT NULL,
            amount_cents INTEGER NOT NULL,
            paid         INTEGER NOT NULL DEFAULT 0,
            note         TEXT DEFAULT '',
            created_at   TEXT NOT NULL
        );

        CREATE TABLE payments (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            agent_id     INTEGER NOT NULL REFERENCES agents(id),
            date         TEXT,
            amount_cents INTEGER NOT NULL,
            created_at   TEXT NOT NULL
        );

        INSERT INTO agents (name, rate_cents, created_at)
        VALUES ('Alice', 1000, '2024-01-01T00:00:00Z');

        INSERT INTO entries (agent_id, site_id, date, start_time, end_time,
                             hours_milli, rate_cents, amount_cents, paid, note, created_at)
        VALUES
            (1, NULL, '2024-05-10', NULL, NULL, 8000, 1000, 8000, 1, 'settled row', '2024-05-10T18:00:00Z'),
            (1, NULL, '2024-05-11', NULL, NULL, 4000, 1000, 4000, 0, 'open row', '2024-05-11T18:00:00Z');

        INSERT INTO payments (agent_id, date, amount_cents, created_at)
        VALUES (1, '2024-05-20', 8000, '2024-05-20T12:00:00Z');
        "#,
    )
    .expect("seed legacy schema");
    drop(conn);

    (dir, db_path)
}

fn has_column(db_path: &str, table: &str, column: &str) -> bool {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info('{}')", table))
        .expect("prepare");
    let cols: Vec<String> = stmt
        .query_map([], |row| row.get(1))
        .expect("query")
        .map(|r| r.expect("row"))
        .collect();
    cols.iter().any(|c| c == column)
}

#[test]
fn test_migrate_converts_paid_flag_to_cents() {
    let (dir, db_path) = setup_legacy_db("paid_flag");

    cl()
        .args(["--db", &db_path, "--test", "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Legacy schema detected"))
        .stdout(contains("Backup created"))
        .stdout(contains("'paid_cents' column populated"))
        .stdout(contains("added 'note' to payments"));

    // Flagged row backfilled with its full amount, open row with zero
    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let rows: Vec<(i64, i64, String)> = conn
        .prepare("SELECT id, paid_cents, note FROM entries ORDER BY id ASC")
        .expect("prepare")
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
        .expect("query")
        .map(|r| r.expect("row"))
        .collect();
    assert_eq!(rows[0], (1, 8000, "settled row".to_string()));
    assert_eq!(rows[1], (2, 0, "open row".to_string()));

    // Old flag is gone, new columns are in place
    assert!(!has_column(&db_path, "entries", "paid"));
    assert!(has_column(&db_path, "entries", "paid_cents"));
    assert!(has_column(&db_path, "payments", "note"));

    // Both migrations left a version row in the log
    let applied: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |row| row.get(0),
        )
        .expect("query");
    assert!(applied >= 2);
    drop(conn);

    // A pre-migration backup zip landed next to the database
    let backups: Vec<_> = fs::read_dir(&dir)
        .expect("read dir")
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_name()
                .to_string_lossy()
                .ends_with("backup_db_pre_paid_cents.zip")
        })
        .collect();
    assert_eq!(backups.len(), 1);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_migrate_is_idempotent() {
    let (dir, db_path) = setup_legacy_db("idempotent");

    cl()
        .args(["--db", &db_path, "--test", "db", "--migrate"])
        .assert()
        .success();

    // Second run finds a modern schema and changes nothing
    cl()
        .args(["--db", &db_path, "--test", "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Legacy schema detected").not())
        .stdout(contains("Migration completed"));

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let paid: Vec<i64> = conn
        .prepare("SELECT paid_cents FROM entries ORDER BY id ASC")
        .expect("prepare")
        .query_map([], |row| row.get(0))
        .expect("query")
        .map(|r| r.expect("row"))
        .collect();
    assert_eq!(paid, vec![8000, 0]);
    drop(conn);

    // Only the first run wrote a backup
    let backups = fs::read_dir(&dir)
        .expect("read dir")
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".zip"))
        .count();
    assert_eq!(backups, 1);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_migrate_fresh_database() {
    let mut path = env::temp_dir();
    path.push("fresh_migrate_crewledger.sqlite");
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();

    cl()
        .args(["--db", &db_path, "--test", "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Created ledger tables"))
        .stdout(contains("Migration completed"));

    // Modern schema straight away, nothing legacy to convert
    assert!(has_column(&db_path, "entries", "paid_cents"));
    assert!(!has_column(&db_path, "entries", "paid"));
    assert!(has_column(&db_path, "payments", "note"));
}

#[test]
fn test_migrated_ledger_supports_partial_payments() {
    let (dir, db_path) = setup_legacy_db("post_migration_flow");

    cl()
        .args(["--db", &db_path, "--test", "db", "--migrate"])
        .assert()
        .success();

    // The open 40.00 entry from the legacy data can now take a partial payment
    cl()
        .args([
            "--db", &db_path, "--test", "pay", "Alice", "15", "--date", "2024-06-01", "--force",
        ])
        .assert()
        .success()
        .stdout(contains("15.00 of 40.00 paid"));

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let paid: i64 = conn
        .query_row("SELECT paid_cents FROM entries WHERE id = 2", [], |row| {
            row.get(0)
        })
        .expect("query");
    assert_eq!(paid, 1_500);
    drop(conn);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_config_migrate_marks_version() {
    let mut path = env::temp_dir();
    path.push("config_migrate_crewledger.sqlite");
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();

    cl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    cl()
        .args(["--db", &db_path, "--test", "config", "--migrate"])
        .assert()
        .success();

    let count_marked = || -> i64 {
        let conn = rusqlite::Connection::open(&db_path).expect("open db");
        conn.query_row(
            "SELECT COUNT(*) FROM log
             WHERE operation = 'migration_applied' AND target LIKE '%add_ledger_keys'",
            [],
            |row| row.get(0),
        )
        .expect("query")
    };
    assert_eq!(count_marked(), 1);

    // Re-running does not duplicate the version row
    cl()
        .args(["--db", &db_path, "--test", "config", "--migrate"])
        .assert()
        .success();
    assert_eq!(count_marked(), 1);
}
