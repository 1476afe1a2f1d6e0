use crate::cli::parser::Commands;
use crate::core::edit::EditLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date;
use crate::utils::money::{parse_amount, parse_hours};
use crate::utils::time::parse_optional_time;

/// Edit an existing entry.
pub fn handle(cmd: &Commands, cfg: &crate::config::Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        date: date_str,
        hours,
        start,
        end,
        rate,
        site,
        note,
    } = cmd
    {
        let d = date_str
            .as_ref()
            .map(|s| date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone())))
            .transpose()?;

        let hours_milli = hours
            .as_ref()
            .map(|h| parse_hours(h).ok_or_else(|| AppError::InvalidHours(h.clone())))
            .transpose()?;

        let start_parsed = parse_optional_time(start.as_ref())?;
        let end_parsed = parse_optional_time(end.as_ref())?;

        let rate_cents = rate
            .as_ref()
            .map(|r| parse_amount(r).ok_or_else(|| AppError::InvalidRate(r.clone())))
            .transpose()?;

        let mut pool = DbPool::new(&cfg.database)?;

        EditLogic::apply(
            &mut pool,
            *id,
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
