use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Handle the `init` command
///
/// This sets up:
///  - the config directory (if missing)
///  - the configuration file
///  - the SQLite database (prod or test mode)
///  - all pending DB migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    //
    // 1️⃣ CONFIG DIRECTORY AND FILE
    //
    // Config::init_all creates ~/.crewledger/ and crewledger.conf, and
    // resolves the DB path (honouring --db when given). In test mode the
    // config file itself is left untouched.
    //
    Config::init_all(cli.db.clone(), cli.test)?;

    let path = Config::config_file();
    // Resolve --db directly: in test mode the config file is left alone,
    // so reading it back would lose the override.
    let db_path = Config::resolve_db_path(cli.db.as_deref())
        .to_string_lossy()
        .to_string();

    println!("⚙️  Initializing crewledger…");
    println!("📄 Config file : {}", path.display());
    println!("🗄️  Database   : {}", &db_path);

    //
    // 2️⃣ OPEN DB
    //
    let conn = Connection::open(&db_path)?;

    //
    // 3️⃣ SCHEMA AND MIGRATIONS
    //
    init_db(&conn)?;

    println!("✅ Database initialized at {}", &db_path);

    //
    // 4️⃣ AUDIT LOG (non-blocking)
    //
    if let Err(e) = log::cllog(
        &conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    ) {
        eprintln!("⚠️ Failed to write internal log: {}", e);
    }

    println!("🎉 crewledger initialization completed!");
    Ok(())
}
