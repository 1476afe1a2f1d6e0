use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { agent, by, period } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        ReportLogic::report(&mut pool, cfg, agent, *by, period.as_deref())?;
    }

    Ok(())
}
