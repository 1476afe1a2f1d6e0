use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{add_entry, cl, init_db_with_agent, setup_test_db};

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("init_schema");

    cl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    // All ledger tables must exist after init
    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    for table in ["agents", "sites", "entries", "payments", "log"] {
        let found: Option<String> = conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
                |row| row.get(0),
            )
            .ok();
        assert_eq!(found.as_deref(), Some(table), "missing table {}", table);
    }
}

#[test]
fn test_agent_add_and_list() {
    let db_path = setup_test_db("agent_add_list");

    cl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    cl()
        .args([
            "--db", &db_path, "--test", "agent", "add", "Alice", "--rate", "12.50",
        ])
        .assert()
        .success()
        .stdout(contains("Added agent #1 'Alice'"));

    cl()
        .args(["--db", &db_path, "--test", "agent", "add", "Bob"])
        .assert()
        .success()
        .stdout(contains("Added agent #2 'Bob'"));

    cl()
        .args(["--db", &db_path, "--test", "agent", "list"])
        .assert()
        .success()
        .stdout(contains("Alice"))
        .stdout(contains("12.50"))
        .stdout(contains("Bob"))
        .stdout(contains("15.00")); // configured default rate
}

#[test]
fn test_agent_add_duplicate_fails() {
    let db_path = setup_test_db("agent_dup");
    init_db_with_agent(&db_path);

    cl()
        .args(["--db", &db_path, "--test", "agent", "add", "Alice"])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn test_agent_rename_keeps_history() {
    let db_path = setup_test_db("agent_rename");
    init_db_with_agent(&db_path);
    add_entry(&db_path, "2025-03-10", "8");

    cl()
        .args([
            "--db", &db_path, "--test", "agent", "rename", "Alice", "Alicia",
        ])
        .assert()
        .success()
        .stdout(contains("Renamed agent 'Alice' to 'Alicia'"));

    cl()
        .args(["--db", &db_path, "--test", "agent", "list"])
        .assert()
        .success()
        .stdout(contains("Alicia"))
        .stdout(contains("Alice").not());

    // Billed history follows the agent id, not the name
    cl()
        .args(["--db", &db_path, "--test", "balance", "Alicia"])
        .assert()
        .success()
        .stdout(contains("Alicia"))
        .stdout(contains("billed 80.00"));
}

#[test]
fn test_agent_rename_duplicate_fails() {
    let db_path = setup_test_db("agent_rename_dup");
    init_db_with_agent(&db_path);

    cl()
        .args(["--db", &db_path, "--test", "agent", "add", "Bob"])
        .assert()
        .success();

    cl()
        .args(["--db", &db_path, "--test", "agent", "rename", "Bob", "Alice"])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn test_agent_rate_change_leaves_old_entries() {
    let db_path = setup_test_db("agent_rate_change");
    init_db_with_agent(&db_path);
    add_entry(&db_path, "2025-03-10", "8");

    cl()
        .args([
            "--db", &db_path, "--test", "agent", "rate", "Alice", "20.00",
        ])
        .assert()
        .success()
        .stdout(contains("Rate for 'Alice' is now 20.00"))
        .stdout(contains("Existing entries keep the rate"));

    // Old entry still billed at 10.00/h, new one at 20.00/h
    add_entry(&db_path, "2025-03-11", "8");

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let amounts: Vec<i64> = conn
        .prepare("SELECT amount_cents FROM entries ORDER BY date ASC")
        .expect("prepare")
        .query_map([], |row| row.get(0))
        .expect("query")
        .map(|r| r.expect("row"))
        .collect();
    assert_eq!(amounts, vec![8_000, 16_000]);
}

#[test]
fn test_agent_del_refused_while_entries_exist() {
    let db_path = setup_test_db("agent_del_refused");
    init_db_with_agent(&db_path);
    add_entry(&db_path, "2025-03-10", "8");

    cl()
        .args([
            "--db", &db_path, "--test", "agent", "del", "Alice", "--force",
        ])
        .assert()
        .success()
        .stdout(contains("still has 1 entries"));

    // Agent must survive
    cl()
        .args(["--db", &db_path, "--test", "agent", "list"])
        .assert()
        .success()
        .stdout(contains("Alice"));
}

#[test]
fn test_agent_del_empty_agent() {
    let db_path = setup_test_db("agent_del_empty");
    init_db_with_agent(&db_path);

    cl()
        .args([
            "--db", &db_path, "--test", "agent", "del", "Alice", "--force",
        ])
        .assert()
        .success()
        .stdout(contains("Deleted agent 'Alice'"));

    cl()
        .args(["--db", &db_path, "--test", "agent", "list"])
        .assert()
        .success()
        .stdout(contains("No agents registered yet"));
}

#[test]
fn test_site_add_and_list() {
    let db_path = setup_test_db("site_add_list");

    cl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    cl()
        .args(["--db", &db_path, "--test", "site", "add", "North Depot"])
        .assert()
        .success()
        .stdout(contains("Added site #1 'North Depot'"));

    cl()
        .args(["--db", &db_path, "--test", "site", "list"])
        .assert()
        .success()
        .stdout(contains("North Depot"));

    // Duplicate site rejected
    cl()
        .args(["--db", &db_path, "--test", "site", "add", "North Depot"])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn test_site_del_refused_while_referenced() {
    let db_path = setup_test_db("site_del_refused");
    init_db_with_agent(&db_path);

    cl()
        .args([
            "--db", &db_path, "--test", "add", "Alice", "--date", "2025-03-10", "--hours", "8",
            "--site", "Depot",
        ])
        .assert()
        .success();

    cl()
        .args(["--db", &db_path, "--test", "site", "del", "Depot", "--force"])
        .assert()
        .success()
        .stdout(contains("still referenced by 1 entries"));

    // Site must survive
    cl()
        .args(["--db", &db_path, "--test", "site", "list"])
        .assert()
        .success()
        .stdout(contains("Depot"));
}

#[test]
fn test_site_del_with_confirmation() {
    let db_path = setup_test_db("site_del_confirm");
    init_db_with_agent(&db_path);

    cl()
        .args(["--db", &db_path, "--test", "site", "add", "Depot"])
        .assert()
        .success();

    // Decline first
    cl()
        .args(["--db", &db_path, "--test", "site", "del", "Depot"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    // Then confirm
    cl()
        .args(["--db", &db_path, "--test", "site", "del", "Depot"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("Deleted site 'Depot'"));

    cl()
        .args(["--db", &db_path, "--test", "site", "list"])
        .assert()
        .success()
        .stdout(contains("No sites registered yet"));
}

#[test]
fn test_site_del_missing() {
    let db_path = setup_test_db("site_del_missing");
    init_db_with_agent(&db_path);

    cl()
        .args([
            "--db", &db_path, "--test", "site", "del", "Nowhere", "--force",
        ])
        .assert()
        .failure()
        .stderr(contains("No site found matching 'Nowhere'"));
}

#[test]
fn test_add_with_hours() {
    let db_path = setup_test_db("add_hours");
    init_db_with_agent(&db_path);

    cl()
        .args([
            "--db",
            &db_path,
            "--test",
            "add",
            "Alice",
            "--date",
            "2025-03-10",
            "--hours",
            "7.5",
            "--site",
            "North Depot",
            "--note",
            "fence repair",
        ])
        .assert()
        .success()
        .stdout(contains("Added entry #1"))
        .stdout(contains("7.50 h"))
        .stdout(contains("at North Depot"))
        .stdout(contains("75.00"));

    // The site was created on the fly
    cl()
        .args(["--db", &db_path, "--test", "site", "list"])
        .assert()
        .success()
        .stdout(contains("North Depot"));
}

#[test]
fn test_add_with_clock_pair() {
    let db_path = setup_test_db("add_clock_pair");
    init_db_with_agent(&db_path);

    cl()
        .args([
            "--db",
            &db_path,
            "--test",
            "add",
            "Alice",
            "--date",
            "2025-03-10",
            "--in",
            "08:00",
            "--out",
            "12:30",
        ])
        .assert()
        .success()
        .stdout(contains("4.50 h"))
        .stdout(contains("45.00"));

    cl()
        .args(["--db", &db_path, "--test", "list", "Alice"])
        .assert()
        .success()
        .stdout(contains("08:00-12:30"));
}

#[test]
fn test_add_rejects_half_clock_pair() {
    let db_path = setup_test_db("add_half_pair");
    init_db_with_agent(&db_path);

    cl()
        .args([
            "--db",
            &db_path,
            "--test",
            "add",
            "Alice",
            "--date",
            "2025-03-10",
            "--in",
            "08:00",
        ])
        .assert()
        .failure()
        .stderr(contains("both --in and --out are required"));
}

#[test]
fn test_add_rejects_end_before_start() {
    let db_path = setup_test_db("add_end_before_start");
    init_db_with_agent(&db_path);

    cl()
        .args([
            "--db",
            &db_path,
            "--test",
            "add",
            "Alice",
            "--date",
            "2025-03-10",
            "--in",
            "17:00",
            "--out",
            "08:00",
        ])
        .assert()
        .failure()
        .stderr(contains("must be later than start time"));
}

#[test]
fn test_add_unknown_agent_fails() {
    let db_path = setup_test_db("add_unknown_agent");

    cl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    cl()
        .args([
            "--db", &db_path, "--test", "add", "Nobody", "--hours", "8",
        ])
        .assert()
        .failure()
        .stderr(contains("Nobody"));
}

#[test]
fn test_list_period_filters() {
    let db_path = setup_test_db("list_period");
    init_db_with_agent(&db_path);
    add_entry(&db_path, "2025-01-10", "8");
    add_entry(&db_path, "2025-02-20", "8");
    add_entry(&db_path, "2024-12-31", "8");

    // Whole year
    cl()
        .args(["--db", &db_path, "--test", "list", "Alice", "--period", "2025"])
        .assert()
        .success()
        .stdout(contains("2025-01-10"))
        .stdout(contains("2025-02-20"))
        .stdout(contains("2024-12-31").not());

    // One month
    cl()
        .args([
            "--db", &db_path, "--test", "list", "Alice", "--period", "2025-02",
        ])
        .assert()
        .success()
        .stdout(contains("2025-02-20"))
        .stdout(contains("2025-01-10").not());

    // Custom range spanning the year boundary
    cl()
        .args([
            "--db",
            &db_path,
            "--test",
            "list",
            "Alice",
            "--period",
            "2024-12:2025-01",
        ])
        .assert()
        .success()
        .stdout(contains("2024-12-31"))
        .stdout(contains("2025-01-10"))
        .stdout(contains("2025-02-20").not());
}

#[test]
fn test_list_invalid_period() {
    let db_path = setup_test_db("list_invalid_period");
    init_db_with_agent(&db_path);
    add_entry(&db_path, "2025-01-10", "8");

    cl()
        .args(["--db", &db_path, "--test", "list", "Alice", "--period", "2025-1"])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));
}

#[test]
fn test_edit_hours_recomputes_amount() {
    let db_path = setup_test_db("edit_hours");
    init_db_with_agent(&db_path);
    add_entry(&db_path, "2025-03-10", "8");

    cl()
        .args(["--db", &db_path, "--test", "edit", "1", "--hours", "9"])
        .assert()
        .success()
        .stdout(contains("Updated entry #1"))
        .stdout(contains("9.00 h"))
        .stdout(contains("90.00"));
}

#[test]
fn test_edit_hours_drops_clock_pair() {
    let db_path = setup_test_db("edit_drop_pair");
    init_db_with_agent(&db_path);

    cl()
        .args([
            "--db",
            &db_path,
            "--test",
            "add",
            "Alice",
            "--date",
            "2025-03-10",
            "--in",
            "08:00",
            "--out",
            "12:00",
        ])
        .assert()
        .success();

    cl()
        .args(["--db", &db_path, "--test", "edit", "1", "--hours", "6"])
        .assert()
        .success();

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let (start, end, hours): (Option<String>, Option<String>, i64) = conn
        .query_row(
            "SELECT start_time, end_time, hours_milli FROM entries WHERE id = 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .expect("query");
    assert_eq!(start, None);
    assert_eq!(end, None);
    assert_eq!(hours, 6_000);
}

#[test]
fn test_edit_site_detach() {
    let db_path = setup_test_db("edit_site_detach");
    init_db_with_agent(&db_path);

    cl()
        .args([
            "--db",
            &db_path,
            "--test",
            "add",
            "Alice",
            "--date",
            "2025-03-10",
            "--hours",
            "8",
            "--site",
            "Depot",
        ])
        .assert()
        .success();

    // Empty --site detaches the entry from its site
    cl()
        .args(["--db", &db_path, "--test", "edit", "1", "--site", ""])
        .assert()
        .success();

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let site_id: Option<i64> = conn
        .query_row("SELECT site_id FROM entries WHERE id = 1", [], |row| {
            row.get(0)
        })
        .expect("query");
    assert_eq!(site_id, None);
}

#[test]
fn test_edit_without_changes_fails() {
    let db_path = setup_test_db("edit_no_changes");
    init_db_with_agent(&db_path);
    add_entry(&db_path, "2025-03-10", "8");

    cl()
        .args(["--db", &db_path, "--test", "edit", "1"])
        .assert()
        .failure()
        .stderr(contains("nothing to update"));
}

#[test]
fn test_edit_missing_entry() {
    let db_path = setup_test_db("edit_missing");
    init_db_with_agent(&db_path);

    cl()
        .args(["--db", &db_path, "--test", "edit", "99", "--hours", "5"])
        .assert()
        .failure()
        .stderr(contains("99"));
}

#[test]
fn test_del_entry_with_confirmation() {
    let db_path = setup_test_db("del_entry_confirm");
    init_db_with_agent(&db_path);
    add_entry(&db_path, "2025-03-10", "8");

    // Decline first
    cl()
        .args(["--db", &db_path, "--test", "del", "entry", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    cl()
        .args(["--db", &db_path, "--test", "list", "Alice"])
        .assert()
        .success()
        .stdout(contains("2025-03-10"));

    // Then confirm
    cl()
        .args(["--db", &db_path, "--test", "del", "entry", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("Deleted entry #1"));

    cl()
        .args(["--db", &db_path, "--test", "list", "Alice"])
        .assert()
        .success()
        .stdout(contains("No entries for Alice"));
}

#[test]
fn test_del_missing_entry() {
    let db_path = setup_test_db("del_missing_entry");
    init_db_with_agent(&db_path);

    cl()
        .args(["--db", &db_path, "--test", "del", "entry", "42", "--force"])
        .assert()
        .failure()
        .stderr(contains("42"));
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("db_info_check");
    init_db_with_agent(&db_path);
    add_entry(&db_path, "2025-03-10", "8");

    cl()
        .args(["--db", &db_path, "--test", "db", "--info"])
        .assert()
        .success()
        .stdout(contains("agents"))
        .stdout(contains("entries"));

    cl()
        .args(["--db", &db_path, "--test", "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"));

    cl()
        .args(["--db", &db_path, "--test", "db", "--vacuum"])
        .assert()
        .success()
        .stdout(contains("Vacuum completed"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("log_records");
    init_db_with_agent(&db_path);
    add_entry(&db_path, "2025-03-10", "8");

    cl()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("Internal log"))
        .stdout(contains("init"))
        .stdout(contains("agent"))
        .stdout(contains("add"));
}
