use crate::cli::parser::{AgentCommands, Commands};
use crate::config::Config;
use crate::core::agents::AgentLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use crate::utils::money::parse_amount;

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
    if let Commands::Agent { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            AgentCommands::Add { name, rate } => {
                let rate_cents = rate
                    .as_ref()
                    .map(|r| parse_amount(r).ok_or_else(|| AppError::InvalidRate(r.clone())))
                    .transpose()?;
                AgentLogic::add(&mut pool, cfg, name, rate_cents)?;
            }
            AgentCommands::List => {
                AgentLogic::list(&mut pool, cfg)?;
            }
            AgentCommands::Rename { agent, name } => {
                AgentLogic::rename(&mut pool, agent, name)?;
            }
            AgentCommands::Rate { agent, rate } => {
                let rate_cents =
                    parse_amount(rate).ok_or_else(|| AppError::InvalidRate(rate.clone()))?;
                AgentLogic::rate(&mut pool, cfg, agent, rate_cents)?;
            }
            AgentCommands::Del { agent, force } => {
                if !*force
                    && !ask_confirmation(&format!(
                        "Delete agent '{}'? This action is irreversible.",
                        agent
                    ))
                {
                    info("Operation cancelled.");
                    return Ok(());
                }
                AgentLogic::del(&mut pool, agent)?;
            }
        }
    }

    Ok(())
}
