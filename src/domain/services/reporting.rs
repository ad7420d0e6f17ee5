use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Month-over-month growth as a percentage, rounded to one decimal.
/// A previous period of zero reports 0.0 rather than infinity.
pub fn growth_rate(previous: i64, current: i64) -> f64 {
    if previous == 0 {
        return 0.0;
    }
    let raw = (current - previous) as f64 / previous as f64 * 100.0;
    round1(raw)
}

pub fn growth_rate_f64(previous: f64, current: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    round1((current - previous) / previous * 100.0)
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Midnight UTC on the first day of the month containing `now`.
pub fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

/// Midnight UTC on the first day of the month `months` before `now`.
pub fn months_back(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    let total = now.year() * 12 + now.month() as i32 - 1 - months as i32;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}
