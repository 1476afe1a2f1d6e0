use crate::cli::parser::Commands;
use crate::core::ledger::{DateRange, compute_totals};
use crate::core::pay::PayLogic;
use crate::db::pool::DbPool;
use crate::db::queries::{load_entries_for_agent, load_payments_for_agent, require_agent};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use crate::utils::date;
use crate::utils::money::parse_amount;

/// Record a payment for an agent.
pub fn handle(cmd: &Commands, cfg: &crate::config::Config) -> AppResult<()> {
    if let Commands::Pay {
        agent,
        amount,
        all,
        date: date_str,
        note,
        force,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        let amount_cents = if *all {
            // Settle whatever is outstanding right now.
            let who = require_agent(&pool.conn, agent)?;
            let entries = load_entries_for_agent(&mut pool, who.id)?;
            let payments = load_payments_for_agent(&mut pool, who.id)?;
            let due = compute_totals(&entries, &payments, &DateRange::all()).due_cents;
            if due == 0 {
                info(format!("{} has no outstanding balance.", who.name));
                return Ok(());
            }
            due
        } else {
            let raw = amount.as_deref().unwrap_or_default();
            parse_amount(raw).ok_or_else(|| AppError::InvalidAmount(raw.to_string()))?
        };

        let d = match date_str {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => date::today(),
        };

        PayLogic::apply(&mut pool, cfg, agent, amount_cents, d, note.as_deref(), *force)?;
    }

    Ok(())
}
