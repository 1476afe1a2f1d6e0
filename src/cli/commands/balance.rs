use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Balance { agent, period } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        ReportLogic::balance(&mut pool, cfg, agent.as_deref(), period.as_deref())?;
    }

    Ok(())
}
