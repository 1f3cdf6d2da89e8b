// Handler for the products view
use super::helpers::{fetch_rows, view_span};
use super::ViewContext;
use crate::aggregators::products::{monthly_products, product_ranking, top_categories};
use crate::data::filter_by_period;
use crate::error::Result;
use crate::parsers::{ProductParser, RowParser};
use shared::models::{Period, ProductRecord};
use shared::views::ProductView;
use tracing::Instrument;

pub async fn handle_get_products(period: Period, ctx: ViewContext) -> Result<ProductView> {
    let span = view_span("products", &period);
    async move {
        let rows = fetch_rows(&ctx, &ctx.settings.sheets.products).await?;
        let view = build_product_view(&period, &ProductParser.parse(&rows), ctx.settings.top_categories);
        tracing::info!(distinct = view.distinct_products, revenue = view.total_revenue, "Product view assembled");
        Ok(view)
    }
    .instrument(span)
    .await
}

pub fn build_product_view(period: &Period, all: &[ProductRecord], category_limit: usize) -> ProductView {
    let in_period = filter_by_period(all, period);
    let ranking = product_ranking(&in_period);
    ProductView {
        distinct_products: ranking.len(),
        total_units: in_period.iter().map(|r| r.units_sold).sum(),
        total_revenue: in_period.iter().map(|r| r.amount).sum(),
        monthly: monthly_products(&in_period),
        categories: top_categories(&in_period, category_limit),
        ranking,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CalendarDate;

    #[test]
    fn test_totals_follow_period() {
        let sold = |d: u32, m: u32, name: &str, units: f64, amount: f64| ProductRecord {
            code: "1".to_string(),
            name: name.to_string(),
            date: CalendarDate::new(d, m, 2023),
            units_sold: units,
            amount,
        };
        let all = vec![sold(1, 3, "A X", 2.0, 20.0), sold(2, 3, "B Y", 1.0, 5.0), sold(1, 4, "A X", 9.0, 90.0)];
        let period = Period::new(CalendarDate::new(1, 3, 2023), CalendarDate::new(31, 3, 2023));
        let view = build_product_view(&period, &all, 8);
        assert_eq!(view.distinct_products, 2);
        assert_eq!(view.total_units, 3.0);
        assert_eq!(view.total_revenue, 25.0);
        assert_eq!(view.categories[0].name, "A");
        assert_eq!(view.monthly.len(), 1);
    }

    #[test]
    fn test_empty_period() {
        let period = Period::new(CalendarDate::new(1, 3, 2023), CalendarDate::new(31, 3, 2023));
        assert_eq!(build_product_view(&period, &[], 8), ProductView::default());
    }
}
