// Handler for the revenue report view
use super::helpers::{fetch_rows, view_span};
use super::ViewContext;
use crate::aggregators::revenue::{chart_points, day_rows, revenue_delta, RevenueTotals};
use crate::data::filter_by_period;
use crate::error::Result;
use crate::parsers::{RevenueParser, RowParser};
use shared::models::{Period, RevenueRecord};
use shared::views::{Kpi, RevenueReport, RevenueSummary};
use tracing::Instrument;

pub async fn handle_get_revenue_report(period: Period, ctx: ViewContext) -> Result<RevenueReport> {
    let span = view_span("revenue", &period);
    async move {
        let rows = fetch_rows(&ctx, &ctx.settings.sheets.revenue).await?;
        let report = build_revenue_report(&period, &RevenueParser.parse(&rows));
        tracing::info!(days = report.days.len(), revenue = report.summary.faturamento.value, "Revenue report assembled");
        Ok(report)
    }
    .instrument(span)
    .await
}

pub fn build_revenue_report(period: &Period, all: &[RevenueRecord]) -> RevenueReport {
    let in_period = filter_by_period(all, period);
    let totals = RevenueTotals::of(&in_period);
    let delta = revenue_delta(all, period);

    RevenueReport {
        summary: RevenueSummary {
            faturamento: Kpi {
                value: totals.revenue,
                delta: delta.percent,
                delta_abs: Some(delta.absolute),
            },
            vendas: Kpi::plain(totals.sale_count as f64),
            ticket_medio: Kpi::plain(totals.average_ticket()),
            devolucao: Kpi::plain(totals.refunds),
            media_diaria: Kpi::plain(totals.revenue / period.day_count() as f64),
        },
        days: day_rows(&in_period),
        chart: chart_points(&in_period),
    }
}
