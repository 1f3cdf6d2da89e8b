// Period filtering over any dated record
use shared::models::{Dated, Period};

/// Records whose date falls inside `period`, both ends included, in their
/// original order.
pub fn filter_by_period<R: Dated + Clone>(records: &[R], period: &Period) -> Vec<R> {
    records
        .iter()
        .filter(|r| period.contains(&r.date()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{CalendarDate, RevenueRecord};

    fn day(d: u32, m: u32, total: f64) -> RevenueRecord {
        RevenueRecord {
            date: CalendarDate::new(d, m, 2023),
            sale_count: 1,
            avg_ticket: total,
            refund_amount: 0.0,
            total_amount: total,
        }
    }

    fn march() -> Period {
        Period::new(CalendarDate::new(1, 3, 2023), CalendarDate::new(31, 3, 2023))
    }

    #[test]
    fn test_filter_keeps_bounds_and_order() {
        let records = vec![day(28, 2, 1.0), day(31, 3, 2.0), day(1, 3, 3.0), day(1, 4, 4.0)];
        let kept = filter_by_period(&records, &march());
        let totals: Vec<f64> = kept.iter().map(|r| r.total_amount).collect();
        assert_eq!(totals, vec![2.0, 3.0]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let records = vec![day(5, 3, 1.0), day(5, 4, 2.0), day(20, 3, 3.0)];
        let once = filter_by_period(&records, &march());
        let twice = filter_by_period(&once, &march());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_empty_input() {
        let records: Vec<RevenueRecord> = Vec::new();
        assert!(filter_by_period(&records, &march()).is_empty());
    }

    #[test]
    fn test_overflowing_date_resolves_before_comparing() {
        // 31/04 is 01/05 on the calendar
        let april = Period::new(CalendarDate::new(1, 4, 2023), CalendarDate::new(30, 4, 2023));
        let records = vec![RevenueRecord { date: CalendarDate::new(31, 4, 2023), ..day(1, 1, 1.0) }];
        assert!(filter_by_period(&records, &april).is_empty());
    }
}
