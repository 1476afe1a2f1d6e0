use crate::cli::parser::{Commands, DelCommands};
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { target } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match target {
            DelCommands::Entry { id, force } => {
                if !*force
                    && !ask_confirmation(&format!(
                        "Delete entry #{}? This action is irreversible.",
                        id
                    ))
                {
                    info("Operation cancelled.");
                    return Ok(());
                }
                DeleteLogic::entry(&mut pool, *id)?;
            }
            DelCommands::Payment { id, force } => {
                if !*force
                    && !ask_confirmation(&format!(
                        "Delete payment #{}? This action is irreversible.",
                        id
                    ))
                {
                    info("Operation cancelled.");
                    return Ok(());
                }
                DeleteLogic::payment(&mut pool, *id)?;
            }
        }
    }

    Ok(())
}
