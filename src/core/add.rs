use crate::db::log::cllog;
use crate::db::pool::DbPool;
use crate::db::queries::{find_or_create_site, insert_entry, require_agent};
use crate::errors::{AppError, AppResult};
use crate::models::entry::TimeEntry;
use crate::ui::messages::success;
use crate::utils::money::{amount_for, format_cents, format_hours};
use crate::utils::time::hours_milli_between;
use chrono::{NaiveDate, NaiveTime};

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Record a new time entry for an agent.
    ///
    /// Worked time comes either from `hours_milli` (the --hours flag) or
    /// from a start/end clock pair; the CLI layer guarantees the two are
    /// never passed together. The billed amount and the rate are frozen
    /// on the row at creation, so later rate changes on the agent leave
    /// history untouched.
    #[allow(clippy::too_many_arguments)]
    pub fn apply(
        pool: &mut DbPool,
        agent_ident: &str,
        date: NaiveDate,
        hours_milli: Option<i64>,
        start: Option<NaiveTime>,
        end: Option<NaiveTime>,
        rate_cents: Option<i64>,
        site: Option<&str>,
        note: Option<&str>,
    ) -> AppResult<()> {
        let agent = require_agent(&pool.conn, agent_ident)?;

        // ------------------------------------------------
        // 1️⃣ Resolve worked hours
        // ------------------------------------------------
        let hours = match (hours_milli, start, end) {
            (Some(h), _, _) => h,
            (None, Some(s), Some(e)) => hours_milli_between(s, e).ok_or_else(|| {
                AppError::InvalidTime(format!(
                    "end time {} must be later than start time {}",
                    e.format("%H:%M"),
                    s.format("%H:%M")
                ))
            })?,
            (None, Some(_), None) | (None, None, Some(_)) => {
                return Err(AppError::InvalidTime(
                    "both --in and --out are required to derive hours".into(),
                ));
            }
            (None, None, None) => {
                return Err(AppError::InvalidHours(
                    "specify --hours or an --in/--out pair".into(),
                ));
            }
        };

        if hours <= 0 {
            return Err(AppError::InvalidHours(
                "worked hours must be greater than zero".into(),
            ));
        }

        // ------------------------------------------------
        // 2️⃣ Resolve rate (entry override or agent default)
        // ------------------------------------------------
        let rate = rate_cents.unwrap_or(agent.rate_cents);
        if rate < 0 {
            return Err(AppError::InvalidRate(format_cents(rate)));
        }

        // ------------------------------------------------
        // 3️⃣ Resolve site (created on the fly when new)
        // ------------------------------------------------
        let site_row = match site {
            Some(name) if !name.trim().is_empty() => {
                Some(find_or_create_site(&pool.conn, name)?)
            }
            _ => None,
        };

        // ------------------------------------------------
        // 4️⃣ Build and persist the entry
        // ------------------------------------------------
        let amount = amount_for(hours, rate);

        let mut entry = TimeEntry::new(
            agent.id,
            site_row.as_ref().map(|s| s.id),
            date,
            start,
            end,
            hours,
            rate,
            amount,
            note.unwrap_or(""),
        );
        entry.id = insert_entry(&pool.conn, &entry)?;

        cllog(
            &pool.conn,
            "add",
            &format!("entry {}", entry.id),
            &format!(
                "Added {} h on {} for agent {} ({})",
                format_hours(hours),
                date,
                agent.name,
                format_cents(amount)
            ),
        )?;

        let site_suffix = site_row
            .map(|s| format!(" at {}", s.name))
            .unwrap_or_default();

        success(format!(
            "Added entry #{}: {} h on {} for {}{} → {}",
            entry.id,
            format_hours(hours),
            date,
            agent.name,
            site_suffix,
            format_cents(amount)
        ));

        Ok(())
    }
}
