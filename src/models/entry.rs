use chrono::{Local, NaiveDate, NaiveTime};
use serde::Serialize;

/// One recorded block of worked time, billed at the rate captured when the
/// entry was created. Money lives in integer cents, worked time in integer
/// milli-hours (thousandths of an hour), so ledger arithmetic is exact.
#[derive(Debug, Clone, Serialize)]
pub struct TimeEntry {
    pub id: i64,
    pub agent_id: i64,              // ⇔ entries.agent_id
    pub site_id: Option<i64>,       // ⇔ entries.site_id (nullable)
    pub site_name: Option<String>,  // joined from sites at load, display only
    pub date: Option<NaiveDate>,    // ⇔ entries.date (TEXT "YYYY-MM-DD", '' on legacy rows)
    pub start: Option<NaiveTime>,   // ⇔ entries.start_time (TEXT "HH:MM")
    pub end: Option<NaiveTime>,     // ⇔ entries.end_time
    pub hours_milli: i64,           // ⇔ entries.hours_milli
    pub rate_cents: i64,            // ⇔ entries.rate_cents, frozen at creation
    pub amount_cents: i64,          // ⇔ entries.amount_cents = hours × rate, rounded once
    pub paid_cents: i64,            // ⇔ entries.paid_cents, 0 ≤ paid ≤ amount
    pub note: String,               // ⇔ entries.note
    pub created_at: String,         // ⇔ entries.created_at (ISO 8601)
}

impl TimeEntry {
    /// Constructor for entries created from the CLI. The id is assigned by
    /// the database on insert.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        agent_id: i64,
        site_id: Option<i64>,
        date: NaiveDate,
        start: Option<NaiveTime>,
        end: Option<NaiveTime>,
        hours_milli: i64,
        rate_cents: i64,
        amount_cents: i64,
        note: &str,
    ) -> Self {
        Self {
            id: 0,
            agent_id,
            site_id,
            site_name: None,
            date: Some(date),
            start,
            end,
            hours_milli,
            rate_cents,
            amount_cents,
            paid_cents: 0,
            note: note.trim().to_string(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    /// True while the entry still has an unpaid remainder.
    pub fn is_unsettled(&self) -> bool {
        self.paid_cents < self.amount_cents
    }

    /// Unpaid remainder, never negative.
    pub fn outstanding_cents(&self) -> i64 {
        (self.amount_cents - self.paid_cents).max(0)
    }

    /// Load-boundary normalization: paid can never exceed the billed amount
    /// and can never be negative, whatever the stored row says.
    pub fn clamp_paid(&mut self) {
        self.paid_cents = self.paid_cents.clamp(0, self.amount_cents.max(0));
    }
}
