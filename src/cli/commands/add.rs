use crate::cli::parser::Commands;
use crate::core::add::AddLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date;
use crate::utils::money::{parse_amount, parse_hours};
use crate::utils::time::parse_optional_time;

/// Record worked time for an agent.
pub fn handle(cmd: &Commands, cfg: &crate::config::Config) -> AppResult<()> {
    if let Commands::Add {
        agent,
        date: date_str,
        hours,
        start,
        end,
        rate,
        site,
        note,
    } = cmd
    {
        //
        // 1. Parse date (defaults to today)
        //
        let d = match date_str {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => date::today(),
        };

        //
        // 2. Parse hours / clock pair
        //
        let hours_milli = hours
            .as_ref()
            .map(|h| parse_hours(h).ok_or_else(|| AppError::InvalidHours(h.clone())))
            .transpose()?;

        let start_parsed = parse_optional_time(start.as_ref())?;
        let end_parsed = parse_optional_time(end.as_ref())?;

        //
        // 3. Parse rate override
        //
        let rate_cents = rate
            .as_ref()
            .map(|r| parse_amount(r).ok_or_else(|| AppError::InvalidRate(r.clone())))
            .transpose()?;

        //
        // 4. Open DB and execute logic
        //
        let mut pool = DbPool::new(&cfg.database)?;

        AddLogic::apply(
            &mut pool,
            agent,
            d,
            hours_milli,
            start_parsed,
            end_parsed,
            rate_cents,
            site.as_deref(),
            note.as_deref(),
        )?;
    }

    Ok(())
}
