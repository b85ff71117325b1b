use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::CellValue;

/// String date formats probed in order; first parse wins.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d"];

static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})").unwrap());

/// Spreadsheet serials count days from 1899-12-30 (the offset absorbs the
/// 1900 leap-year bug). Non-finite or out-of-range serials are `None`, so
/// an absurd numeric cell becomes a row error instead of a panic.
pub(crate) fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(Duration::try_days(serial as i64)?)
}

/// Serial with a fractional day component, e.g. 45261.4375 = 2023-12-01 10:30.
pub(crate) fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    let date = excel_serial_to_date(serial)?;
    let seconds = (serial.fract().abs() * 86400.0).round() as i64;
    date.and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::try_seconds(seconds)?)
}

fn parse_date_str(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

fn parse_time(value: &CellValue) -> String {
    match value {
        // Fraction of a day; zero is falsy and falls through to the default.
        CellValue::Number(v) if *v > 0.0 && *v < 1.0 => {
            let hours = (v * 24.0).floor() as u32;
            let minutes = ((v * 24.0 * 60.0).floor() as u32) % 60;
            format!("{hours:02}:{minutes:02}")
        }
        CellValue::Text(s) => match TIME_RE.captures(s) {
            Some(caps) => {
                let hours: u32 = caps[1].parse().unwrap_or(24);
                let minutes: u32 = caps[2].parse().unwrap_or(60);
                // Out-of-range wall-clock values would stamp a timestamp
                // that can never be parsed back; treat them as no time.
                if hours <= 23 && minutes <= 59 {
                    format!("{hours:02}:{minutes:02}")
                } else {
                    "00:00".to_string()
                }
            }
            None => "00:00".to_string(),
        },
        _ => "00:00".to_string(),
    }
}

/// Coerce a date cell plus an optional time cell into the canonical
/// `yyyy-MM-ddTHH:MM:00.000Z` timestamp. `None` means no date could be
/// derived; the importer turns that into a row-level error.
pub fn parse_date_time(date_value: &CellValue, time_value: &CellValue) -> Option<String> {
    let date = match date_value {
        CellValue::Number(n) => excel_serial_to_date(*n)?,
        CellValue::DateTime(dt) => dt.date(),
        CellValue::Text(s) => parse_date_str(s)?,
        CellValue::Empty => return None,
    };
    let time = parse_time(time_value);
    Some(format!("{}T{}:00.000Z", date.format("%Y-%m-%d"), time))
}

/// Coerce an amount cell to a signed number. Text is stripped of currency
/// symbols and whitespace with decimal commas converted to points.
/// Anything unparseable yields 0.
pub fn parse_cost(value: &CellValue) -> f64 {
    match value {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => {
            let clean: String = s
                .chars()
                .filter(|c| !c.is_whitespace() && !matches!(c, '₴' | '$' | '€' | '£'))
                .map(|c| if c == ',' { '.' } else { c })
                .collect();
            clean.parse().unwrap_or(0.0)
        }
        _ => 0.0,
    }
}

/// Parse the canonical timestamp back into a point in time. Shared by the
/// validator, analytics, and display formatting.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}
