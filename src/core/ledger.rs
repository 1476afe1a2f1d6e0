//! Read-side balance computation over an agent's entries and payments.
//! Pure functions over already-loaded rows: no database access, no hidden
//! state, exact integer arithmetic.

use crate::errors::AppResult;
use crate::models::entry::TimeEntry;
use crate::models::payment::Payment;
use crate::utils::date::parse_period;
use chrono::NaiveDate;

/// Inclusive date window. Either bound may be absent; a fully open range
/// keeps every record, including legacy rows with no date at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn since(start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// Range for a --period / --range flag. Absent or "all" keeps
    /// everything; any other value goes through [`parse_period`].
    pub fn parse(period: Option<&str>) -> AppResult<Self> {
        match period {
            None => Ok(Self::all()),
            Some(p) if p.eq_ignore_ascii_case("all") => Ok(Self::all()),
            Some(p) => {
                let (start, end) = parse_period(p)?;
                Ok(Self::between(start, end))
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Filtering rule: a record is kept iff its date is present AND within
    /// both active bounds. Undated records are dropped as soon as any bound
    /// is set.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        if self.is_open() {
            return true;
        }
        let Some(d) = date else {
            return false;
        };
        if let Some(s) = self.start
            && d < s
        {
            return false;
        }
        if let Some(e) = self.end
            && d > e
        {
            return false;
        }
        true
    }
}

/// Aggregate balances for one agent.
///
/// `paid_cents` sums the payment records themselves, not the per-entry paid
/// state: a payment larger than the outstanding total still counts in full
/// here even though its excess was never applied to any entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub hours_milli: i64,
    pub amount_cents: i64,
    pub paid_cents: i64,
    pub due_cents: i64,
}

pub fn compute_totals(entries: &[TimeEntry], payments: &[Payment], range: &DateRange) -> Totals {
    let mut hours_milli = 0;
    let mut amount_cents = 0;

    for e in entries {
        if range.contains(e.date) {
            hours_milli += e.hours_milli;
            amount_cents += e.amount_cents;
        }
    }

    let mut paid_cents = 0;
    for p in payments {
        if range.contains(p.date) {
            paid_cents += p.amount_cents;
        }
    }

    Totals {
        hours_milli,
        amount_cents,
        paid_cents,
        due_cents: (amount_cents - paid_cents).max(0),
    }
}
