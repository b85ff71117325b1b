use chrono::{Datelike, Local};

use crate::cells::parse_timestamp;

/// Abbreviated Ukrainian month names, as uk-UA "d MMM yyyy" prints them.
const MONTHS_UK: [&str; 12] = [
    "січ.", "лют.", "бер.", "квіт.", "трав.", "черв.",
    "лип.", "серп.", "вер.", "жовт.", "лист.", "груд.",
];

/// Format a hryvnia amount the way the uk-UA locale prints it:
/// space-grouped thousands, decimal comma, sign prefix — `-1 234,56 ₴`.
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = format!("{:.2}", amount.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    if negative {
        format!("-{grouped},{dec_part} ₴")
    } else {
        format!("{grouped},{dec_part} ₴")
    }
}

/// Human label for a timestamp's calendar day: Сьогодні, Учора, or a
/// localized "d MMM yyyy". Unparseable input comes back unchanged.
pub fn format_date_for_display(date_string: &str) -> String {
    let Some(ts) = parse_timestamp(date_string) else {
        return date_string.to_string();
    };
    let day = ts.date_naive();
    let today = Local::now().date_naive();

    if day == today {
        return "Сьогодні".to_string();
    }
    if Some(day) == today.pred_opt() {
        return "Учора".to_string();
    }
    format!("{} {} {}", day.day(), MONTHS_UK[day.month0() as usize], day.year())
}

/// `HH:mm` recomputed from the timestamp; `00:00` when it cannot be parsed.
pub fn format_time_for_display(date_string: &str) -> String {
    match parse_timestamp(date_string) {
        Some(ts) => ts.format("%H:%M").to_string(),
        None => "00:00".to_string(),
    }
}
