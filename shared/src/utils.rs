// Label helpers shared by the aggregators and the views.
use crate::models::CalendarDate;

/// Weekday names, week starting on Sunday.
pub const WEEKDAY_NAMES: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

/// "DD/MM" label used by the daily series.
pub fn day_label(date: &CalendarDate) -> String {
    format!("{:02}/{:02}", date.day, date.month)
}

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// First two characters of a name, upper-cased.
pub fn initials(name: &str) -> String {
    name.chars().take(2).collect::<String>().to_uppercase()
}
