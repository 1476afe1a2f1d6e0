use chrono::Local;
use serde::Serialize;

/// A job site. Pure label with no lifecycle of its own.
#[derive(Debug, Clone, Serialize)]
pub struct Site {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

impl Site {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            created_at: Local::now().to_rfc3339(),
        }
    }
}
