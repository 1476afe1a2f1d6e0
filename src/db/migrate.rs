use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if a table has a given column.
fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the ledger tables with the modern schema.
///
/// `date`, `start_time` and `end_time` are nullable on purpose: rows
/// imported from old exports may carry no date, and manual-hours entries
/// carry no clock times.
fn create_ledger_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS agents (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT NOT NULL UNIQUE,
            rate_cents INTEGER NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sites (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS entries (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            agent_id     INTEGER NOT NULL REFERENCES agents(id),
            site_id      INTEGER REFERENCES sites(id),
            date         TEXT,
            start_time   TEXT,
            end_time     TEXT,
            hours_milli  INTEGER NOT NULL,
            rate_cents   INTEGER NOT NULL,
            amount_cents INTEGER NOT NULL,
            paid_cents   INTEGER NOT NULL DEFAULT 0,
            note         TEXT DEFAULT '',
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_entries_agent_date ON entries(agent_id, date);

        CREATE TABLE IF NOT EXISTS payments (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            agent_id     INTEGER NOT NULL REFERENCES agents(id),
            date         TEXT,
            amount_cents INTEGER NOT NULL,
            note         TEXT DEFAULT '',
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_payments_agent_date ON payments(agent_id, date);
        "#,
    )?;
    Ok(())
}

/// Rebuild `entries`, converting the legacy boolean `paid` flag into the
/// cumulative `paid_cents` column.
///
/// Old versions only knew "settled / not settled": a set flag meant the
/// whole amount had been paid. That maps onto the partial-payment model as
/// paid_cents = amount_cents for flagged rows and 0 for the rest.
fn migrate_paid_flag_to_cents(conn: &Connection) -> Result<()> {
    warning("Converting legacy 'paid' flag to 'paid_cents'...");

    conn.execute_batch(
        r#"
        PRAGMA foreign_keys=OFF;
        BEGIN;

        ALTER TABLE entries RENAME TO entries_old;

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
            paid_cents   INTEGER NOT NULL DEFAULT 0,
            note         TEXT DEFAULT '',
            created_at   TEXT NOT NULL
        );

        INSERT INTO entries (id, agent_id, site_id, date, start_time, end_time,
                             hours_milli, rate_cents, amount_cents, paid_cents,
                             note, created_at)
        SELECT id, agent_id, site_id, date, start_time, end_time,
               hours_milli, rate_cents, amount_cents,
               CASE WHEN paid <> 0 THEN amount_cents ELSE 0 END,
               note, created_at
        FROM entries_old;

        DROP TABLE entries_old;

        CREATE INDEX IF NOT EXISTS idx_entries_agent_date ON entries(agent_id, date);

        UPDATE sqlite_sequence
            SET seq = (SELECT IFNULL(MAX(id), 0) FROM entries)
        WHERE name = 'entries';

        COMMIT;
        PRAGMA foreign_keys=ON;
        "#,
    )?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', 'paid_cents',
                 'Converted paid flag to paid_cents on entries')",
        [],
    )?;

    success("'paid_cents' column populated from legacy flag.");
    Ok(())
}

/// Add the `note` column to payments on databases created before it
/// existed. Guarded both by a version row and a column check so re-runs
/// and fresh databases are no-ops.
fn migrate_add_note_to_payments(conn: &Connection) -> Result<()> {
    let version = "20250719_0005_add_note_to_payments";

    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    if !table_has_column(conn, "payments", "note")? {
        conn.execute("ALTER TABLE payments ADD COLUMN note TEXT DEFAULT '';", [])?;
        success(format!(
            "Migration applied: {} → added 'note' to payments table",
            version
        ));
    }

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added note column to payments')",
        [version],
    )?;

    Ok(())
}

fn backup_before_migration(db_path: &str) -> Result<()> {
    use chrono::Local;
    use rusqlite::Error;
    use std::fs::{self, File};
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let backup_name = format!(
        "{}-backup_db_pre_paid_cents.zip",
        Local::now().format("%Y%m%d_%H%M%S")
    );

    let backup_path = std::path::Path::new(db_path)
        .parent()
        .unwrap_or_else(|| std::path::Path::new("."))
        .join(&backup_name);

    let file = File::create(&backup_path).map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::new(
            e.kind(),
            format!("Backup failed (create): {}", e),
        )))
    })?;

    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options).map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed (start_file): {}",
            e
        ))))
    })?;

    let db_content = fs::read(db_path).map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed (read): {}",
            e
        ))))
    })?;

    zip.write_all(&db_content).map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed (write_all): {}",
            e
        ))))
    })?;

    zip.finish().map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed (finish): {}",
            e
        ))))
    })?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Detect legacy schema (boolean paid flag, pre partial payments)
    let entries_exists = table_exists(conn, "entries")?;
    let is_legacy_schema = entries_exists
        && table_has_column(conn, "entries", "paid")?
        && !table_has_column(conn, "entries", "paid_cents")?;

    // 3) If legacy → perform PRE-MIGRATION BACKUP
    if is_legacy_schema {
        warning("Legacy schema detected, creating safety backup before migration...");

        let db_path: String = conn
            .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
            .unwrap_or_default();

        if !db_path.is_empty() {
            backup_before_migration(&db_path)?;
        } else {
            warning("Could not determine DB path, backup skipped.");
        }
    }

    // 4) Ensure all tables exist (no-op on up-to-date databases), then
    //    rebuild entries when the legacy flag was found
    create_ledger_tables(conn)?;
    if !entries_exists {
        success("Created ledger tables (modern schema).");
    } else if is_legacy_schema {
        migrate_paid_flag_to_cents(conn)?;
    }

    // 5) Column additions for databases from older versions
    migrate_add_note_to_payments(conn)?;

    Ok(())
}
