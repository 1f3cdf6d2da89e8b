// Customer analytics: period ranking joined with lifetime history, inactivity,
// monthly evolution and the two histograms.
use super::keys::CustomerName;
use super::{group_by, sort_desc_by, Grouped};
use shared::models::{CalendarDate, CustomerRecord, MonthKey};
use shared::views::{CustomerMonth, CustomerRank, InactiveCustomer, RecurrenceBucket, SpendBucket};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PeriodStats {
    pub purchases: u32,
    pub total: f64,
}

impl PeriodStats {
    pub fn ticket(&self) -> f64 {
        if self.purchases > 0 {
            self.total / f64::from(self.purchases)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LifetimeStats {
    pub purchases: u32,
    pub total: f64,
    pub last_purchase: Option<CalendarDate>,
}

pub type PeriodMap = Grouped<CustomerName, PeriodStats>;
pub type HistoryMap = Grouped<CustomerName, LifetimeStats>;

pub fn period_map(records: &[CustomerRecord]) -> PeriodMap {
    group_by(
        records,
        |r| CustomerName(r.name.clone()),
        |acc: &mut PeriodStats, r| {
            acc.purchases += 1;
            acc.total += r.amount;
        },
    )
}

/// Whole-history stats per customer, including the most recent purchase day.
pub fn history_map(records: &[CustomerRecord]) -> HistoryMap {
    group_by(
        records,
        |r| CustomerName(r.name.clone()),
        |acc: &mut LifetimeStats, r| {
            acc.purchases += 1;
            acc.total += r.amount;
            let newer = acc
                .last_purchase
                .map_or(true, |last| r.date.day_number() > last.day_number());
            if newer {
                acc.last_purchase = Some(r.date);
            }
        },
    )
}

/// Period ranking by total spent, each entry carrying its last purchase ever.
pub fn customer_ranking(period: &PeriodMap, history: &HistoryMap) -> Vec<CustomerRank> {
    let mut ranking: Vec<CustomerRank> = period
        .iter()
        .map(|(name, stats)| CustomerRank {
            name: name.0.clone(),
            purchases: stats.purchases,
            total: stats.total,
            ticket: stats.ticket(),
            last_purchase: history.get(name).and_then(|h| h.last_purchase),
        })
        .collect();
    sort_desc_by(&mut ranking, |r| r.total);
    ranking
}

/// Customers whose last purchase is more than `threshold_days` before `today`,
/// stalest first.
pub fn inactive_customers(
    history: &HistoryMap,
    today: CalendarDate,
    threshold_days: i64,
) -> Vec<InactiveCustomer> {
    let mut inactive: Vec<InactiveCustomer> = history
        .iter()
        .filter_map(|(name, stats)| {
            let last = stats.last_purchase?;
            let days = last.days_until(&today);
            (days > threshold_days).then(|| InactiveCustomer {
                name: name.0.clone(),
                purchases: stats.purchases,
                total: stats.total,
                ticket: if stats.purchases > 0 {
                    stats.total / f64::from(stats.purchases)
                } else {
                    0.0
                },
                days_without_purchase: days,
                last_purchase: last,
            })
        })
        .collect();
    inactive.sort_by_key(|c| c.last_purchase.day_number());
    inactive
}

/// Spend and distinct customers per month, oldest month first.
pub fn monthly_customers(records: &[CustomerRecord]) -> Vec<CustomerMonth> {
    records
        .iter()
        .fold(
            BTreeMap::<MonthKey, (f64, HashSet<&str>)>::new(),
            |mut months, r| {
                let entry = months.entry(r.date.month_key()).or_default();
                entry.0 += r.amount;
                entry.1.insert(r.name.as_str());
                months
            },
        )
        .into_iter()
        .map(|(month, (total, names))| CustomerMonth {
            month: month.to_string(),
            total,
            customers: names.len(),
        })
        .collect()
}

struct SpendRange {
    label: &'static str,
    // lower bound is exclusive except for the first range
    above: f64,
    up_to: f64,
}

const SPEND_RANGES: [SpendRange; 5] = [
    SpendRange { label: "Até R$200", above: 0.0, up_to: 200.0 },
    SpendRange { label: "R$201–R$500", above: 200.0, up_to: 500.0 },
    SpendRange { label: "R$501–R$1.000", above: 500.0, up_to: 1000.0 },
    SpendRange { label: "R$1.001–R$5.000", above: 1000.0, up_to: 5000.0 },
    SpendRange { label: "Acima de R$5.000", above: 5000.0, up_to: f64::INFINITY },
];

impl SpendRange {
    fn contains(&self, total: f64, first: bool) -> bool {
        let above = if first { total >= self.above } else { total > self.above };
        above && total <= self.up_to
    }
}

/// Customers per range of period spend; empty ranges are left out.
pub fn spend_buckets(period: &PeriodMap) -> Vec<SpendBucket> {
    SPEND_RANGES
        .iter()
        .enumerate()
        .map(|(i, range)| SpendBucket {
            label: range.label.to_string(),
            count: period
                .iter()
                .filter(|(_, stats)| range.contains(stats.total, i == 0))
                .count(),
        })
        .filter(|bucket| bucket.count > 0)
        .collect()
}

/// Customers per number of purchases in the period; `cap` and above share
/// the "<cap>+" bucket.
pub fn recurrence(period: &PeriodMap, cap: u32) -> Vec<RecurrenceBucket> {
    period
        .iter()
        .fold(BTreeMap::<u32, usize>::new(), |mut counts, (_, stats)| {
            *counts.entry(stats.purchases.min(cap)).or_default() += 1;
            counts
        })
        .into_iter()
        .map(|(purchases, customers)| RecurrenceBucket {
            purchases: if purchases >= cap {
                format!("{}+", cap)
            } else {
                purchases.to_string()
            },
            customers,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CustomerTotals {
    pub unique_customers: usize,
    pub total_spend: f64,
    pub avg_spend_per_customer: f64,
}

pub fn customer_totals(period: &PeriodMap) -> CustomerTotals {
    let unique_customers = period.len();
    let total_spend: f64 = period.iter().map(|(_, stats)| stats.total).sum();
    CustomerTotals {
        unique_customers,
        total_spend,
        avg_spend_per_customer: if unique_customers > 0 {
            total_spend / unique_customers as f64
        } else {
            0.0
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buy(name: &str, d: u32, m: u32, y: u32, amount: f64) -> CustomerRecord {
        CustomerRecord {
            name: name.to_string(),
            date: CalendarDate::new(d, m, y),
            sale_ref: "0".to_string(),
            amount,
        }
    }

    #[test]
    fn test_ranking_joins_lifetime_last_purchase() {
        let all = vec![
            buy("ANA", 1, 3, 2023, 10.0),
            buy("BIA", 2, 3, 2023, 100.0),
            buy("ANA", 3, 3, 2023, 20.0),
            buy("ANA", 20, 4, 2023, 5.0),
        ];
        let in_march = &all[..3];
        let ranking = customer_ranking(&period_map(in_march), &history_map(&all));
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].name, "BIA");
        assert_eq!(ranking[1].name, "ANA");
        assert_eq!(ranking[1].purchases, 2);
        assert_eq!(ranking[1].total, 30.0);
        assert_eq!(ranking[1].ticket, 15.0);
        assert_eq!(ranking[1].last_purchase, Some(CalendarDate::new(20, 4, 2023)));
    }

    #[test]
    fn test_last_purchase_ignores_sheet_order() {
        let history = history_map(&[buy("ANA", 9, 5, 2023, 1.0), buy("ANA", 1, 5, 2023, 1.0)]);
        let ana = history.get(&CustomerName::from("ANA")).unwrap();
        assert_eq!(ana.last_purchase, Some(CalendarDate::new(9, 5, 2023)));
        assert_eq!(ana.purchases, 2);
    }

    #[test]
    fn test_inactivity_threshold_is_strict() {
        let today = CalendarDate::new(1, 3, 2023);
        let sixty_one = today.add_days(-61);
        let sixty = today.add_days(-60);
        let history = history_map(&[
            buy("OLD", sixty_one.day, sixty_one.month, sixty_one.year, 10.0),
            buy("EDGE", sixty.day, sixty.month, sixty.year, 10.0),
        ]);
        let inactive = inactive_customers(&history, today, 60);
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].name, "OLD");
        assert_eq!(inactive[0].days_without_purchase, 61);
    }

    #[test]
    fn test_inactive_sorted_stalest_first() {
        let history = history_map(&[
            buy("B", 1, 6, 2022, 1.0),
            buy("A", 1, 1, 2022, 1.0),
            buy("C", 25, 12, 2022, 1.0),
        ]);
        let names: Vec<String> = inactive_customers(&history, CalendarDate::new(1, 1, 2023), 60)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_monthly_orders_across_years() {
        let months = monthly_customers(&[
            buy("A", 1, 1, 2023, 5.0),
            buy("A", 2, 12, 2022, 1.0),
            buy("B", 3, 12, 2022, 2.0),
            buy("A", 4, 12, 2022, 3.0),
        ]);
        assert_eq!(
            months,
            vec![
                CustomerMonth { month: "12/2022".to_string(), total: 6.0, customers: 2 },
                CustomerMonth { month: "01/2023".to_string(), total: 5.0, customers: 1 },
            ]
        );
    }

    #[test]
    fn test_spend_buckets() {
        let period = period_map(&[
            buy("A", 1, 1, 2023, 200.0),
            buy("B", 1, 1, 2023, 200.5),
            buy("C", 1, 1, 2023, 150.0),
            buy("D", 1, 1, 2023, 9000.0),
        ]);
        assert_eq!(
            spend_buckets(&period),
            vec![
                SpendBucket { label: "Até R$200".to_string(), count: 2 },
                SpendBucket { label: "R$201–R$500".to_string(), count: 1 },
                SpendBucket { label: "Acima de R$5.000".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_recurrence_caps() {
        let mut records = Vec::new();
        for _ in 0..12 {
            records.push(buy("FREQ", 1, 1, 2023, 1.0));
        }
        records.push(buy("ONCE", 1, 1, 2023, 1.0));
        records.push(buy("TWICE", 1, 1, 2023, 1.0));
        records.push(buy("TWICE", 2, 1, 2023, 1.0));
        records.push(buy("ONCE2", 1, 1, 2023, 1.0));
        let buckets = recurrence(&period_map(&records), 10);
        assert_eq!(
            buckets,
            vec![
                RecurrenceBucket { purchases: "1".to_string(), customers: 2 },
                RecurrenceBucket { purchases: "2".to_string(), customers: 1 },
                RecurrenceBucket { purchases: "10+".to_string(), customers: 1 },
            ]
        );
    }

    #[test]
    fn test_totals_on_empty_period() {
        let totals = customer_totals(&period_map(&[]));
        assert_eq!(totals, CustomerTotals::default());
    }
}
