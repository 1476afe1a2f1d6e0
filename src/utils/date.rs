use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Year-month prefix of a date ("2024-03"), used by the monthly breakdown.
pub fn month_key(d: NaiveDate) -> String {
    d.format("%Y-%m").to_string()
}

fn month_last_day(y: i32, m: u32) -> Option<u32> {
    match m {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => {
            let leap = (y % 4 == 0 && y % 100 != 0) || (y % 400 == 0);
            Some(if leap { 29 } else { 28 })
        }
        _ => None,
    }
}

/// Expand a single period token (YYYY / YYYY-MM / YYYY-MM-DD) into its
/// inclusive first and last day.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p
                .parse()
                .map_err(|_| AppError::InvalidDate(p.to_string()))?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1)
                .ok_or_else(|| AppError::InvalidDate(p.to_string()))?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31)
                .ok_or_else(|| AppError::InvalidDate(p.to_string()))?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let y: i32 = p[0..4]
                .parse()
                .map_err(|_| AppError::InvalidDate(p.to_string()))?;
            let m: u32 = p[5..7]
                .parse()
                .map_err(|_| AppError::InvalidDate(p.to_string()))?;
            let last =
                month_last_day(y, m).ok_or_else(|| AppError::InvalidDate(p.to_string()))?;
            let d1 = NaiveDate::from_ymd_opt(y, m, 1)
                .ok_or_else(|| AppError::InvalidDate(p.to_string()))?;
            let d2 = NaiveDate::from_ymd_opt(y, m, last)
                .ok_or_else(|| AppError::InvalidDate(p.to_string()))?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = parse_date(p).ok_or_else(|| AppError::InvalidDate(p.to_string()))?;
            Ok((d, d))
        }
        _ => Err(AppError::InvalidDate(p.to_string())),
    }
}

/// Parse a --period / --range expression into inclusive date bounds.
///
/// Supported:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - start:end with both sides in the same format, e.g. 2024-01:2024-03
pub fn parse_period(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some((start_raw, end_raw)) = p.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.is_empty() || end.is_empty() || start.len() != end.len() {
            return Err(AppError::InvalidDate(p.to_string()));
        }

        let (d1, _) = period_bounds(start)?;
        let (_, d2) = period_bounds(end)?;
        Ok((d1, d2))
    } else {
        period_bounds(p.trim())
    }
}
