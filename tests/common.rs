#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn cl() -> Command {
    cargo_bin_cmd!("crewledger")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_crewledger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB schema and register one agent "Alice" at 10.00/h
pub fn init_db_with_agent(db_path: &str) {
    cl()
        .args(["--db", db_path, "--test", "init"]) // uses --test init to create schema
        .assert()
        .success();

    cl()
        .args([
            "--db", db_path, "--test", "agent", "add", "Alice", "--rate", "10.00",
        ])
        .assert()
        .success();
}

/// Add one entry for Alice via the CLI
pub fn add_entry(db_path: &str, date: &str, hours: &str) {
    cl()
        .args([
            "--db", db_path, "--test", "add", "Alice", "--date", date, "--hours", hours,
        ])
        .assert()
        .success();
}

/// Record a payment for Alice via the CLI (force skips the overpay prompt)
pub fn pay(db_path: &str, date: &str, amount: &str) {
    cl()
        .args([
            "--db", db_path, "--test", "pay", "Alice", amount, "--date", date, "--force",
        ])
        .assert()
        .success();
}

/// Read (amount_cents, paid_cents) for every entry, ordered by date then id
pub fn entry_states(db_path: &str) -> Vec<(i64, i64)> {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    let mut stmt = conn
        .prepare("SELECT amount_cents, paid_cents FROM entries ORDER BY date ASC, id ASC")
        .expect("prepare");
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .expect("query");
    rows.map(|r| r.expect("row")).collect()
}

/// Populate many entries directly via the library DB API for bigger datasets
pub fn populate_many_entries(db_path: &str, agent: &str, n: usize) {
    let pool = crewledger::db::pool::DbPool::new(db_path).expect("open db");
    crewledger::db::initialize::init_db(&pool.conn).expect("init db");

    let agent_row = crewledger::models::agent::Agent::new(0, agent, 1000);
    let agent_id =
        crewledger::db::queries::insert_agent(&pool.conn, &agent_row).expect("insert agent");

    for i in 0..n {
        let day = (i % 28) + 1; // 1..28
        let date = chrono::NaiveDate::from_ymd_opt(2025, 11, day as u32).expect("date");
        let entry = crewledger::models::entry::TimeEntry::new(
            agent_id,
            None,
            date,
            None,
            None,
            8_000,
            1000,
            crewledger::utils::money::amount_for(8_000, 1000),
            "",
        );
        crewledger::db::queries::insert_entry(&pool.conn, &entry).expect("insert entry");
    }
}
