use chrono::{Local, NaiveDate};
use serde::Serialize;

/// A recorded payment to an agent. Payments are append-only ledger facts:
/// the amount is stored independently of how much of it was allocated to
/// entries, and deleting one does not rewind its allocation.
#[derive(Debug, Clone, Serialize)]
pub struct Payment {
    pub id: i64,
    pub agent_id: i64,
    pub date: Option<NaiveDate>,
    pub amount_cents: i64, // > 0, validated before insert
    pub note: String,
    pub created_at: String,
}

impl Payment {
    pub fn new(agent_id: i64, date: NaiveDate, amount_cents: i64, note: &str) -> Self {
        Self {
            id: 0,
            agent_id,
            date: Some(date),
            amount_cents,
            note: note.trim().to_string(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}
