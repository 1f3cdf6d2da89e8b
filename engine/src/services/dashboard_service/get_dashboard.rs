// Handler for the main dashboard view: all four sheets, fetched concurrently.
use super::helpers::{fetch_rows, view_span};
use super::ViewContext;
use crate::aggregators::payments::{payment_methods, sales_channels};
use crate::aggregators::rankings::{top_clients, top_products};
use crate::aggregators::revenue::{revenue_delta, RevenueTotals};
use crate::aggregators::sales::{daily_series, weekday_series};
use crate::config::DashboardSettings;
use crate::data::filter_by_period;
use crate::error::Result;
use crate::parsers::{CustomerParser, PaymentParser, ProductParser, RevenueParser, RowParser};
use shared::models::{CustomerRecord, PaymentRecord, Period, ProductRecord, RevenueRecord};
use shared::utils::round2;
use shared::views::{DashboardKpis, DashboardView, Kpi};
use tracing::Instrument;

pub async fn handle_get_dashboard(period: Period, ctx: ViewContext) -> Result<DashboardView> {
    let span = view_span("dashboard", &period);
    async move {
        let sheets = &ctx.settings.sheets;
        // Any failed sheet aborts the whole view.
        let (revenue_rows, payment_rows, product_rows, customer_rows) = tokio::try_join!(
            fetch_rows(&ctx, &sheets.revenue),
            fetch_rows(&ctx, &sheets.payments),
            fetch_rows(&ctx, &sheets.products),
            fetch_rows(&ctx, &sheets.customers),
        )?;

        let view = build_dashboard(
            &period,
            &RevenueParser.parse(&revenue_rows),
            &PaymentParser.parse(&payment_rows),
            &ProductParser.parse(&product_rows),
            &CustomerParser.parse(&customer_rows),
            &ctx.settings,
        );
        tracing::info!(
            revenue = view.kpis.faturamento.value,
            payments = view.payments.len(),
            top_products = view.top_products.len(),
            "Dashboard assembled"
        );
        Ok(view)
    }
    .instrument(span)
    .await
}

/// Shapes the dashboard from already parsed (unfiltered) records.
pub fn build_dashboard(
    period: &Period,
    revenue: &[RevenueRecord],
    payments: &[PaymentRecord],
    products: &[ProductRecord],
    customers: &[CustomerRecord],
    settings: &DashboardSettings,
) -> DashboardView {
    let revenue_in = filter_by_period(revenue, period);
    let payments_in = filter_by_period(payments, period);
    let products_in = filter_by_period(products, period);
    let customers_in = filter_by_period(customers, period);

    let totals = RevenueTotals::of(&revenue_in);
    let delta = revenue_delta(revenue, period);
    let days = period.day_count() as f64;

    let kpis = DashboardKpis {
        faturamento: Kpi {
            value: totals.revenue,
            delta: delta.percent,
            delta_abs: Some(delta.absolute),
        },
        // gross sales amount; the sale count is "atendimentos"
        vendas: Kpi::plain(totals.revenue),
        ticket_medio: Kpi::plain(totals.average_ticket()),
        atendimentos: Kpi::plain(totals.sale_count as f64),
        taxa_atendimento: Kpi::plain(round2(totals.revenue / days)),
    };

    let breakdown = payment_methods(&payments_in, &settings.negative_payment_methods);
    let channels = sales_channels(&breakdown.shares);

    DashboardView {
        kpis,
        payments: breakdown.shares,
        channels,
        payments_net: breakdown.net_total,
        sales_by_hour: daily_series(&revenue_in),
        sales_by_day: weekday_series(&revenue_in),
        top_products: top_products(&products_in, settings.top_products),
        top_clients: top_clients(&customers_in, settings.top_clients),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CalendarDate;

    fn march() -> Period {
        Period::new(CalendarDate::new(1, 3, 2023), CalendarDate::new(31, 3, 2023))
    }

    #[test]
    fn test_empty_records_give_zeroed_view() {
        let view = build_dashboard(&march(), &[], &[], &[], &[], &DashboardSettings::default());
        assert_eq!(view.kpis.faturamento.value, 0.0);
        assert_eq!(view.kpis.faturamento.delta, None);
        assert_eq!(view.kpis.faturamento.delta_abs, Some(0.0));
        assert_eq!(view.kpis.ticket_medio.value, 0.0);
        assert!(view.payments.is_empty());
        assert!(view.sales_by_hour.is_empty());
        assert!(view.top_clients.is_empty());
    }

    #[test]
    fn test_daily_rate_over_period_days() {
        let revenue = vec![RevenueRecord {
            date: CalendarDate::new(2, 3, 2023),
            sale_count: 3,
            avg_ticket: 100.0,
            refund_amount: 0.0,
            total_amount: 310.0,
        }];
        let view = build_dashboard(&march(), &revenue, &[], &[], &[], &DashboardSettings::default());
        assert_eq!(view.kpis.taxa_atendimento.value, 10.0);
        assert_eq!(view.kpis.atendimentos.value, 3.0);
        assert_eq!(view.kpis.vendas.value, 310.0);
        assert_eq!(view.kpis.ticket_medio.value, 310.0 / 3.0);
    }

    #[test]
    fn test_payments_net_counts_negative_methods() {
        let pay = |method: &str, amount: f64| PaymentRecord {
            date: CalendarDate::new(2, 3, 2023),
            method: method.to_string(),
            amount,
        };
        let payments = vec![pay("Pix", 300.0), pay("Vale Presente", 50.0), pay("Débito", 20.0)];
        let view = build_dashboard(&march(), &[], &payments, &[], &[], &DashboardSettings::default());
        assert_eq!(view.payments_net, 270.0);
        assert_eq!(view.channels.len(), 2);
    }
}
