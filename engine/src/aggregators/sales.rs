// Revenue per calendar day and per weekday
use super::group_by;
use super::keys::DayLabel;
use chrono::Datelike;
use shared::models::RevenueRecord;
use shared::utils::{day_label, WEEKDAY_NAMES};
use shared::views::{HourPoint, SeriesPoint};

/// Sums per "DD/MM" label, ordered by label. Labels only sort correctly
/// inside one month; a period spanning months interleaves them.
pub fn daily_series(records: &[RevenueRecord]) -> Vec<HourPoint> {
    let mut points: Vec<HourPoint> = group_by(
        records,
        |r| DayLabel(day_label(&r.date)),
        |acc: &mut f64, r| *acc += r.total_amount,
    )
    .into_entries()
    .into_iter()
    .map(|(label, value)| HourPoint { hour: label.0, value })
    .collect();
    points.sort_by(|a, b| a.hour.cmp(&b.hour));
    points
}

/// Sums per weekday, Sunday first. Weekdays without records are left out.
pub fn weekday_series(records: &[RevenueRecord]) -> Vec<SeriesPoint> {
    let buckets = records.iter().fold([None::<f64>; 7], |mut buckets, r| {
        let idx = r.date.to_naive().weekday().num_days_from_sunday() as usize;
        buckets[idx] = Some(buckets[idx].unwrap_or(0.0) + r.total_amount);
        buckets
    });
    WEEKDAY_NAMES
        .iter()
        .zip(buckets)
        .filter_map(|(name, total)| {
            total.map(|value| SeriesPoint {
                day: name.to_string(),
                value,
            })
        })
        .collect()
}
