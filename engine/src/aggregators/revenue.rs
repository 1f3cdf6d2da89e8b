// Revenue totals and period-over-period change
use crate::data::filter_by_period;
use shared::models::{Period, RevenueRecord};
use shared::utils::{day_label, round2};
use shared::views::{RevenueDayRow, SeriesPoint};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RevenueTotals {
    pub revenue: f64,
    pub sale_count: u64,
    pub refunds: f64,
}

impl RevenueTotals {
    pub fn of(records: &[RevenueRecord]) -> Self {
        records.iter().fold(Self::default(), |acc, r| RevenueTotals {
            revenue: acc.revenue + r.total_amount,
            sale_count: acc.sale_count + u64::from(r.sale_count),
            refunds: acc.refunds + r.refund_amount,
        })
    }

    /// Revenue per sale, 0 without sales.
    pub fn average_ticket(&self) -> f64 {
        if self.sale_count > 0 {
            self.revenue / self.sale_count as f64
        } else {
            0.0
        }
    }
}

/// Requested period against the one of equal length right before it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevenueDelta {
    pub current: f64,
    pub previous: f64,
    /// Percentage change, two decimals; `None` when the previous period had no revenue.
    pub percent: Option<f64>,
    pub absolute: f64,
}

pub fn delta_percent(current: f64, previous: f64) -> Option<f64> {
    (previous > 0.0).then(|| round2((current - previous) / previous * 100.0))
}

/// `all` is the unfiltered sheet; both periods are cut from it.
pub fn revenue_delta(all: &[RevenueRecord], period: &Period) -> RevenueDelta {
    let current = RevenueTotals::of(&filter_by_period(all, period)).revenue;
    let previous = RevenueTotals::of(&filter_by_period(all, &period.previous())).revenue;
    RevenueDelta {
        current,
        previous,
        percent: delta_percent(current, previous),
        absolute: current - previous,
    }
}

pub fn day_rows(records: &[RevenueRecord]) -> Vec<RevenueDayRow> {
    records
        .iter()
        .map(|r| RevenueDayRow {
            date: r.date,
            sale_count: r.sale_count,
            avg_ticket: r.avg_ticket,
            refund_amount: r.refund_amount,
            total_amount: r.total_amount,
        })
        .collect()
}

/// One point per record, in sheet order.
pub fn chart_points(records: &[RevenueRecord]) -> Vec<SeriesPoint> {
    records
        .iter()
        .map(|r| SeriesPoint {
            day: day_label(&r.date),
            value: r.total_amount,
        })
        .collect()
}
