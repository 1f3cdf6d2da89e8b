// Handler for the customers view
use super::helpers::{fetch_rows, view_span};
use super::ViewContext;
use crate::aggregators::customers::{
    customer_ranking, customer_totals, history_map, inactive_customers, monthly_customers,
    period_map, recurrence, spend_buckets,
};
use crate::config::DashboardSettings;
use crate::data::filter_by_period;
use crate::error::Result;
use crate::parsers::{CustomerParser, RowParser};
use shared::models::{CalendarDate, CustomerRecord, Period};
use shared::views::CustomerView;
use tracing::Instrument;

pub async fn handle_get_customers(period: Period, ctx: ViewContext) -> Result<CustomerView> {
    let span = view_span("customers", &period);
    async move {
        let rows = fetch_rows(&ctx, &ctx.settings.sheets.customers).await?;
        let records = CustomerParser.parse(&rows);
        let today = ctx.clock.today();
        let view = build_customer_view(&period, &records, today, &ctx.settings);
        tracing::info!(
            %today,
            ranked = view.ranking.len(),
            inactive = view.inactive.len(),
            "Customer view assembled"
        );
        Ok(view)
    }
    .instrument(span)
    .await
}

/// `all` is the full history; inactivity is judged against `today`.
pub fn build_customer_view(
    period: &Period,
    all: &[CustomerRecord],
    today: CalendarDate,
    settings: &DashboardSettings,
) -> CustomerView {
    if all.is_empty() {
        return CustomerView::default();
    }
    let in_period = filter_by_period(all, period);
    let history = history_map(all);
    let by_customer = period_map(&in_period);
    let totals = customer_totals(&by_customer);

    CustomerView {
        ranking: customer_ranking(&by_customer, &history),
        inactive: inactive_customers(&history, today, settings.inactivity_days),
        monthly: monthly_customers(&in_period),
        spend_buckets: spend_buckets(&by_customer),
        recurrence: recurrence(&by_customer, settings.recurrence_cap),
        unique_customers: totals.unique_customers,
        total_spend: totals.total_spend,
        avg_spend_per_customer: totals.avg_spend_per_customer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buy(name: &str, d: u32, m: u32, amount: f64) -> CustomerRecord {
        CustomerRecord {
            name: name.to_string(),
            date: CalendarDate::new(d, m, 2023),
            sale_ref: "1".to_string(),
            amount,
        }
    }

    #[test]
    fn test_no_records_gives_empty_view() {
        let period = Period::new(CalendarDate::new(1, 3, 2023), CalendarDate::new(31, 3, 2023));
        let view = build_customer_view(&period, &[], CalendarDate::new(1, 6, 2023), &DashboardSettings::default());
        assert_eq!(view, CustomerView::default());
    }

    #[test]
    fn test_view_combines_period_and_history() {
        let all = vec![buy("ANA", 5, 1, 50.0), buy("ANA", 10, 3, 100.0), buy("BIA", 11, 3, 300.0)];
        let period = Period::new(CalendarDate::new(1, 3, 2023), CalendarDate::new(31, 3, 2023));
        let view = build_customer_view(&period, &all, CalendarDate::new(1, 6, 2023), &DashboardSettings::default());
        assert_eq!(view.unique_customers, 2);
        assert_eq!(view.total_spend, 400.0);
        assert_eq!(view.avg_spend_per_customer, 200.0);
        assert_eq!(view.ranking[0].name, "BIA");
        assert_eq!(view.ranking[1].last_purchase, Some(CalendarDate::new(10, 3, 2023)));
        // both last bought in March, more than 60 days before June
        assert_eq!(view.inactive.len(), 2);
        assert_eq!(view.inactive[0].name, "ANA");
        assert_eq!(view.inactive[0].purchases, 2);
        assert_eq!(view.monthly.len(), 1);
        assert_eq!(view.recurrence.len(), 1);
    }

    #[test]
    fn test_period_without_purchases_still_reports_inactive() {
        let all = vec![buy("ANA", 5, 1, 50.0)];
        let period = Period::new(CalendarDate::new(1, 5, 2023), CalendarDate::new(31, 5, 2023));
        let view = build_customer_view(&period, &all, CalendarDate::new(1, 6, 2023), &DashboardSettings::default());
        assert!(view.ranking.is_empty());
        assert_eq!(view.unique_customers, 0);
        assert_eq!(view.avg_spend_per_customer, 0.0);
        assert_eq!(view.inactive.len(), 1);
    }
}
