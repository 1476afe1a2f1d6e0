use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::list::ListLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        agent,
        period,
        unpaid,
        payments,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;
        ListLogic::apply(&mut pool, cfg, agent, period.as_deref(), *unpaid, *payments)?;
    }

    Ok(())
}
