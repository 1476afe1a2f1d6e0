//! Money helpers. Every amount in the application is carried as integer
//! cents (i64); worked time as integer thousandths of an hour. Decimal
//! strings exist only at the input/display boundary, so sums and the
//! hours-times-rate product never accumulate floating-point drift.

/// Integer division rounding half-up. Callers only pass non-negative
/// numerators (amounts and hours are validated non-negative upstream).
pub fn div_round_half_up(n: i64, d: i64) -> i64 {
    (n + d / 2) / d
}

/// Billed amount in cents for a worked duration at a given hourly rate.
/// 1.005 h at 15.00/h is 1507.5 tenths of a cent and rounds up to 15.08.
pub fn amount_for(hours_milli: i64, rate_cents: i64) -> i64 {
    div_round_half_up(hours_milli * rate_cents, 1000)
}

/// Parse a decimal string into a fixed-point integer with `scale` fraction
/// digits. Digits past the scale round half-up. Accepts "12", "12.5",
/// ".5", "12," style input (a single comma is treated as the decimal
/// separator). Negative values are rejected.
fn parse_fixed(s: &str, scale: u32) -> Option<i64> {
    let mut s = s.trim().to_string();
    if s.contains(',') && !s.contains('.') {
        s = s.replacen(',', ".", 1);
    }
    if s.is_empty() || s.starts_with('-') || s.starts_with('+') {
        return None;
    }

    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s.as_str(), ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let unit = 10_i64.pow(scale);
    let base: i64 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().ok()?
    };

    let scale = scale as usize;
    let digits: Vec<i64> = frac_part
        .chars()
        .map(|c| (c as u8 - b'0') as i64)
        .collect();

    let mut frac: i64 = 0;
    for i in 0..scale {
        frac = frac * 10 + digits.get(i).copied().unwrap_or(0);
    }
    if digits.get(scale).is_some_and(|d| *d >= 5) {
        frac += 1;
    }

    base.checked_mul(unit)?.checked_add(frac)
}

/// Parse a currency amount ("15", "15.5", "15.08") into cents.
pub fn parse_amount(s: &str) -> Option<i64> {
    parse_fixed(s, 2)
}

/// Parse an hours value ("8", "7.75", "1.005") into milli-hours.
pub fn parse_hours(s: &str) -> Option<i64> {
    parse_fixed(s, 3)
}

/// Format cents as a plain decimal string ("1507" -> "15.07").
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let c = cents.abs();
    format!("{}{}.{:02}", sign, c / 100, c % 100)
}

/// Format milli-hours with two decimals for display ("7750" -> "7.75").
pub fn format_hours(hours_milli: i64) -> String {
    format_cents(div_round_half_up(hours_milli, 10))
}

/// Format cents with the configured currency symbol appended.
pub fn format_money(cents: i64, currency: &str) -> String {
    format!("{} {}", format_cents(cents), currency)
}
