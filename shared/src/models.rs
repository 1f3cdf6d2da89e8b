use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A spreadsheet date as written in the source: day, month and year with no
/// timezone. Components are kept exactly as parsed; out-of-range values
/// (31/04) are accepted and only resolved when a real calendar day is needed.
/// Equality, hashing and ordering all go through the resolved day, so 31/04
/// and 01/05 are the same date.
#[derive(Debug, Clone, Copy)]
pub struct CalendarDate {
    pub day: u32,
    pub month: u32,
    pub year: u32,
}

impl CalendarDate {
    pub fn new(day: u32, month: u32, year: u32) -> Self {
        Self { day, month, year }
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self {
            day: date.day(),
            month: date.month(),
            year: date.year().max(0) as u32,
        }
    }

    /// Resolves to a real calendar day. Overflowing days and months roll
    /// forward (31/04/2023 is 01/05/2023, 01/13/2023 is 01/01/2024).
    pub fn to_naive(&self) -> NaiveDate {
        let month0 = self.month.saturating_sub(1);
        let year = self.year.saturating_add(month0 / 12);
        let month = month0 % 12 + 1;
        i32::try_from(year)
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, month, 1))
            .and_then(|first| first.checked_add_days(Days::new(u64::from(self.day.saturating_sub(1)))))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Day number used for range checks and elapsed-day arithmetic.
    pub fn day_number(&self) -> i64 {
        i64::from(self.to_naive().num_days_from_ce())
    }

    pub fn add_days(&self, days: i64) -> Self {
        let naive = self.to_naive();
        let shifted = if days >= 0 {
            naive.checked_add_days(Days::new(days as u64))
        } else {
            naive.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        Self::from_naive(shifted.unwrap_or(naive))
    }

    pub fn days_until(&self, later: &CalendarDate) -> i64 {
        later.day_number() - self.day_number()
    }

    pub fn month_key(&self) -> MonthKey {
        let naive = self.to_naive();
        MonthKey {
            year: naive.year().max(0) as u32,
            month: naive.month(),
        }
    }
}

impl PartialEq for CalendarDate {
    fn eq(&self, other: &Self) -> bool {
        self.day_number() == other.day_number()
    }
}

impl Eq for CalendarDate {}

impl Hash for CalendarDate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.day_number().hash(state);
    }
}

impl Ord for CalendarDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.day_number().cmp(&other.day_number())
    }
}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{}", self.day, self.month, self.year)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDate(pub String);

impl fmt::Display for InvalidDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected DD/MM/YYYY, got '{}'", self.0)
    }
}

impl std::error::Error for InvalidDate {}

impl FromStr for CalendarDate {
    type Err = InvalidDate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        let invalid = || InvalidDate(s.to_string());
        if parts.len() != 3 {
            return Err(invalid());
        }
        let num = |p: &str| p.trim().parse::<u32>().ok().filter(|n| *n > 0);
        match (num(parts[0]), num(parts[1]), num(parts[2])) {
            (Some(day), Some(month), Some(year)) => Ok(Self::new(day, month, year)),
            _ => Err(invalid()),
        }
    }
}

// Dates travel as "DD/MM/YYYY" so view tables stay flat for CSV export.
impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Calendar month used as a grouping key; orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: u32,
    pub month: u32,
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// Inclusive date range. `start <= end` is the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: CalendarDate,
    pub end: CalendarDate,
}

impl Period {
    pub fn new(start: CalendarDate, end: CalendarDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        let day = date.day_number();
        day >= self.start.day_number() && day <= self.end.day_number()
    }

    /// Number of days covered, never less than one.
    pub fn day_count(&self) -> i64 {
        (self.start.days_until(&self.end) + 1).max(1)
    }

    /// The period of equal length ending the day before this one starts.
    pub fn previous(&self) -> Period {
        let span = self.start.days_until(&self.end);
        Period {
            start: self.start.add_days(-span - 1),
            end: self.start.add_days(-1),
        }
    }
}

/// Every parsed record carries exactly one date; filtering keys off it.
pub trait Dated {
    fn date(&self) -> CalendarDate;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueRecord {
    pub date: CalendarDate,
    pub sale_count: u32,
    pub avg_ticket: f64,
    pub refund_amount: f64,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub date: CalendarDate,
    pub method: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub code: String,
    pub name: String,
    pub date: CalendarDate,
    pub units_sold: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub name: String,
    pub date: CalendarDate,
    pub sale_ref: String,
    pub amount: f64,
}

impl Dated for RevenueRecord {
    fn date(&self) -> CalendarDate {
        self.date
    }
}

impl Dated for PaymentRecord {
    fn date(&self) -> CalendarDate {
        self.date
    }
}

impl Dated for ProductRecord {
    fn date(&self) -> CalendarDate {
        self.date
    }
}

impl Dated for CustomerRecord {
    fn date(&self) -> CalendarDate {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflowing_day_rolls_into_next_month() {
        let date = CalendarDate::new(31, 4, 2023);
        assert_eq!(date.to_naive(), NaiveDate::from_ymd_opt(2023, 5, 1).unwrap());
    }

    #[test]
    fn overflowing_month_rolls_into_next_year() {
        let date = CalendarDate::new(1, 13, 2023);
        assert_eq!(date.to_naive(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn ordering_is_year_month_day() {
        let a = CalendarDate::new(31, 1, 2023);
        let b = CalendarDate::new(1, 2, 2023);
        let c = CalendarDate::new(1, 1, 2024);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn overflowing_date_equals_its_resolved_day() {
        let overflow = CalendarDate::new(31, 4, 2023);
        let resolved = CalendarDate::new(1, 5, 2023);
        assert_eq!(overflow, resolved);
        assert_eq!(overflow.cmp(&resolved), Ordering::Equal);
        assert!(CalendarDate::new(30, 4, 2023) < overflow);
        let days: std::collections::HashSet<CalendarDate> = [overflow, resolved].into_iter().collect();
        assert_eq!(days.len(), 1);
        assert_eq!(overflow.month_key(), resolved.month_key());
        // the written form is kept
        assert_eq!(overflow.to_string(), "31/04/2023");
    }

    #[test]
    fn period_contains_is_inclusive() {
        let period = Period::new(CalendarDate::new(1, 3, 2023), CalendarDate::new(31, 3, 2023));
        assert!(period.contains(&CalendarDate::new(1, 3, 2023)));
        assert!(period.contains(&CalendarDate::new(31, 3, 2023)));
        assert!(!period.contains(&CalendarDate::new(28, 2, 2023)));
        assert!(!period.contains(&CalendarDate::new(1, 4, 2023)));
    }

    #[test]
    fn previous_period_has_equal_length() {
        let period = Period::new(CalendarDate::new(1, 3, 2023), CalendarDate::new(31, 3, 2023));
        let prev = period.previous();
        assert_eq!(prev.end, CalendarDate::new(28, 2, 2023));
        assert_eq!(prev.start, CalendarDate::new(29, 1, 2023));
        assert_eq!(prev.day_count(), period.day_count());
    }

    #[test]
    fn single_day_period_counts_one_day() {
        let day = CalendarDate::new(10, 3, 2023);
        let period = Period::new(day, day);
        assert_eq!(period.day_count(), 1);
        assert_eq!(period.previous(), Period::new(CalendarDate::new(9, 3, 2023), CalendarDate::new(9, 3, 2023)));
    }

    #[test]
    fn date_serializes_as_slash_string() {
        let json = serde_json::to_string(&CalendarDate::new(5, 3, 2023)).unwrap();
        assert_eq!(json, "\"05/03/2023\"");
        let back: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CalendarDate::new(5, 3, 2023));
    }

    #[test]
    fn month_key_orders_across_years() {
        let dec = CalendarDate::new(15, 12, 2022).month_key();
        let jan = CalendarDate::new(2, 1, 2023).month_key();
        assert!(dec < jan);
        assert_eq!(jan.to_string(), "01/2023");
    }
}
