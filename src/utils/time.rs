//! Time utilities: parsing HH:MM pairs and deriving worked hours from them.

use crate::errors::{AppError, AppResult};
use crate::utils::money::div_round_half_up;
use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes()
}

/// Worked duration between two clock times, in milli-hours.
/// The end must be after the start (no overnight spans).
pub fn hours_milli_between(start: NaiveTime, end: NaiveTime) -> Option<i64> {
    let mins = minutes_between(start, end);
    if mins <= 0 {
        return None;
    }
    Some(div_round_half_up(mins * 1000, 60))
}
