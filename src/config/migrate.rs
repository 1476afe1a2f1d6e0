//! Config file migrations. Keys added to the YAML config in later
//! versions are backfilled here with their defaults, version-tracked in
//! the database `log` table like the schema migrations.

use crate::ui::messages::success;
use rusqlite::{Connection, Error, OptionalExtension};
use serde_yaml::Value;
use std::fs;

const VERSION: &str = "20250601_0003_add_ledger_keys";

/// Keys the config gained after the first release, with their defaults.
const ADDED_KEYS: [(&str, &str); 3] = [
    ("default_rate", "15.00"),
    ("currency", "€"),
    ("csv_delimiter", ";"),
];

/// Add missing config keys with default values and mark the migration as
/// applied. Idempotent: a version row in `log` short-circuits re-runs.
pub fn run_config_migration(conn: &Connection) -> Result<(), Error> {
    // Ensure log table exists
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            operation TEXT NOT NULL,
            target TEXT DEFAULT '',
            message TEXT NOT NULL
        );",
    )?;

    // Check if this migration version is already marked as applied
    let mut chk = conn.prepare(
        "SELECT 1 FROM log WHERE operation = 'migration_applied' AND target = ?1 LIMIT 1",
    )?;
    if chk.query_row([VERSION], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    let conf_file = super::Config::config_file();
    let mut added: Vec<&str> = Vec::new();

    if conf_file.exists() {
        let content = fs::read_to_string(&conf_file).map_err(|e| {
            Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(format!("Failed to read config {:?}: {}", conf_file, e)),
            )
        })?;

        if let Ok(mut yaml) = serde_yaml::from_str::<Value>(&content)
            && let Some(map) = yaml.as_mapping_mut()
        {
            for (key, default) in ADDED_KEYS {
                let k = Value::String(key.to_string());
                if !map.contains_key(&k) {
                    map.insert(k, Value::String(default.to_string()));
                    added.push(key);
                }
            }

            if !added.is_empty() {
                let serialized = serde_yaml::to_string(&yaml).map_err(|e| {
                    Error::SqliteFailure(
                        rusqlite::ffi::Error::new(1),
                        Some(format!(
                            "Failed to serialize updated config {:?}: {}",
                            conf_file, e
                        )),
                    )
                })?;

                fs::write(&conf_file, serialized).map_err(|e| {
                    Error::SqliteFailure(
                        rusqlite::ffi::Error::new(1),
                        Some(format!(
                            "Failed to write updated config {:?}: {}",
                            conf_file, e
                        )),
                    )
                })?;
            }
        }
    }

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added missing config keys')",
        [VERSION],
    )?;

    if added.is_empty() {
        success("Configuration is already up to date.");
    } else {
        success(format!(
            "Migration applied: {} → added config keys: {}",
            VERSION,
            added.join(", ")
        ));
    }

    Ok(())
}
