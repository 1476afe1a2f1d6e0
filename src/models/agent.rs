use chrono::Local;
use serde::Serialize;

/// A field agent whose worked hours and payments are tracked.
///
/// `rate_cents` is the default hourly rate applied to NEW entries; changing
/// it never rewrites rates already captured on existing entries.
#[derive(Debug, Clone, Serialize)]
pub struct Agent {
    pub id: i64,
    pub name: String,
    pub rate_cents: i64,
    pub created_at: String, // ISO 8601
}

impl Agent {
    pub fn new(id: i64, name: &str, rate_cents: i64) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            rate_cents,
            created_at: Local::now().to_rfc3339(),
        }
    }
}
