use crate::cli::parser::Commands;
use crate::config::{self, Config};
use crate::core::config::ConfigLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();
        let path_str = path.to_string_lossy();

        if !(*print_config || *check || *migrate || *edit_config) {
            info("Nothing to do. Try 'config --print' or 'config --check'.");
            return Ok(());
        }

        if *print_config {
            println!("📄 Current configuration ({}):\n", path_str);
            ConfigLogic::print(&path_str)?;
        }

        if *check {
            ConfigLogic::check(&path_str)?;
        }

        if *migrate {
            // Version rows live next to the schema migrations in the DB log.
            let pool = DbPool::new(&cfg.database)?;
            config::migrate::run_config_migration(&pool.conn)?;
        }

        if *edit_config {
            ConfigLogic::edit(&path_str, editor)?;
        }
    }

    Ok(())
}
