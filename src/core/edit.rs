use crate::db::log::cllog;
use crate::db::pool::DbPool;
use crate::db::queries::{find_entry, find_or_create_site, update_entry};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::money::{amount_for, format_cents, format_hours};
use crate::utils::time::hours_milli_between;
use chrono::{NaiveDate, NaiveTime};

/// High-level business logic for the `edit` command.
pub struct EditLogic;

impl EditLogic {
    /// Update fields of an existing entry.
    ///
    /// Passing --hours replaces the worked time and drops any stored clock
    /// pair; passing --in/--out updates the pair and re-derives the hours
    /// from it, so the two representations can never disagree on a row.
    /// When hours or rate change the amount is recomputed and the paid
    /// total clamped back into [0, amount].
    #[allow(clippy::too_many_arguments)]
    pub fn apply(
        pool: &mut DbPool,
        id: i64,
        date: Option<NaiveDate>,
        hours_milli: Option<i64>,
        start: Option<NaiveTime>,
        end: Option<NaiveTime>,
        rate_cents: Option<i64>,
        site: Option<&str>,
        note: Option<&str>,
    ) -> AppResult<()> {
        let mut entry = find_entry(&pool.conn, id)?.ok_or(AppError::EntryNotFound(id))?;

        if date.is_none()
            && hours_milli.is_none()
            && start.is_none()
            && end.is_none()
            && rate_cents.is_none()
            && site.is_none()
            && note.is_none()
        {
            return Err(AppError::Other(
                "nothing to update: pass at least one of --date, --hours, --in/--out, --rate, --site, --note".into(),
            ));
        }

        if let Some(d) = date {
            entry.date = Some(d);
        }

        // ------------------------------------------------
        // Worked time: explicit hours win, clock pair second
        // ------------------------------------------------
        let mut billing_changed = false;

        if let Some(h) = hours_milli {
            if h <= 0 {
                return Err(AppError::InvalidHours(
                    "worked hours must be greater than zero".into(),
                ));
            }
            entry.hours_milli = h;
            entry.start = None;
            entry.end = None;
            billing_changed = true;
        } else if start.is_some() || end.is_some() {
            let s = start.or(entry.start).ok_or_else(|| {
                AppError::InvalidTime("entry has no start time, pass --in as well".into())
            })?;
            let e = end.or(entry.end).ok_or_else(|| {
                AppError::InvalidTime("entry has no end time, pass --out as well".into())
            })?;

            entry.hours_milli = hours_milli_between(s, e).ok_or_else(|| {
                AppError::InvalidTime(format!(
                    "end time {} must be later than start time {}",
                    e.format("%H:%M"),
                    s.format("%H:%M")
                ))
            })?;
            entry.start = Some(s);
            entry.end = Some(e);
            billing_changed = true;
        }

        if let Some(r) = rate_cents {
            if r < 0 {
                return Err(AppError::InvalidRate(format_cents(r)));
            }
            entry.rate_cents = r;
            billing_changed = true;
        }

        if billing_changed {
            entry.amount_cents = amount_for(entry.hours_milli, entry.rate_cents);
            entry.clamp_paid();
        }

        if let Some(name) = site {
            if name.trim().is_empty() {
                entry.site_id = None;
                entry.site_name = None;
            } else {
                let s = find_or_create_site(&pool.conn, name)?;
                entry.site_id = Some(s.id);
                entry.site_name = Some(s.name);
            }
        }

        if let Some(n) = note {
            entry.note = n.trim().to_string();
        }

        update_entry(&pool.conn, &entry)?;

        cllog(
            &pool.conn,
            "edit",
            &format!("entry {}", entry.id),
            &format!(
                "Updated entry {}: {} h at {} → {}",
                entry.id,
                format_hours(entry.hours_milli),
                format_cents(entry.rate_cents),
                format_cents(entry.amount_cents)
            ),
        )?;

        success(format!(
            "✏️ Updated entry #{}: {} h × {} → {} (paid {})",
            entry.id,
            format_hours(entry.hours_milli),
            format_cents(entry.rate_cents),
            format_cents(entry.amount_cents),
            format_cents(entry.paid_cents)
        ));

        Ok(())
    }
}
