use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Bring a database up to the current ledger schema.
///
/// Schema creation and upgrades are owned entirely by the migration
/// engine, so opening an empty file and opening a legacy one go through
/// the same path.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;
    Ok(())
}
