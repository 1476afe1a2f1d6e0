use crate::cli::parser::{Commands, SiteCommands};
use crate::config::Config;
use crate::core::sites::SiteLogic;
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
    if let Commands::Site { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            SiteCommands::Add { name } => SiteLogic::add(&mut pool, name)?,
            SiteCommands::List => SiteLogic::list(&mut pool)?,
            SiteCommands::Del { site, force } => {
                if !*force
                    && !ask_confirmation(&format!(
                        "Delete site '{}'? This action is irreversible.",
                        site
                    ))
                {
                    info("Operation cancelled.");
                    return Ok(());
                }
                SiteLogic::del(&mut pool, site)?;
            }
        }
    }

    Ok(())
}
