// Hub of the dashboard service: the service struct, its shared context and
// the per-view handler modules.
use super::view_state::ViewSlot;
use crate::clock::{Clock, SystemClock};
use crate::config::DashboardSettings;
use crate::data::SheetSource;
use crate::error::Result;
use shared::models::Period;
use shared::views::{CustomerView, DashboardView, ProductView, RevenueReport};
use std::future::Future;
use std::sync::Arc;
use tracing::Instrument;

pub mod get_customers;
pub mod get_dashboard;
pub mod get_products;
pub mod get_revenue_report;
pub mod helpers;

/// Everything a handler needs for one request. Cheap to clone.
#[derive(Clone)]
pub struct ViewContext {
    pub source: Arc<dyn SheetSource>,
    pub settings: Arc<DashboardSettings>,
    pub clock: Arc<dyn Clock>,
}

pub struct DashboardService {
    ctx: ViewContext,
    dashboard: ViewSlot<DashboardView>,
    revenue: ViewSlot<RevenueReport>,
    customers: ViewSlot<CustomerView>,
    products: ViewSlot<ProductView>,
}

impl DashboardService {
    pub fn new(source: Arc<dyn SheetSource>, settings: DashboardSettings) -> Self {
        DashboardService {
            ctx: ViewContext {
                source,
                settings: Arc::new(settings),
                clock: Arc::new(SystemClock),
            },
            dashboard: ViewSlot::new("dashboard"),
            revenue: ViewSlot::new("revenue"),
            customers: ViewSlot::new("customers"),
            products: ViewSlot::new("products"),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.ctx.clock = clock;
        self
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.ctx.settings
    }

    pub async fn get_dashboard(&self, period: Period) -> Result<DashboardView> {
        tracing::info!(from = %period.start, to = %period.end, "Received dashboard request, dispatching to handler.");
        get_dashboard::handle_get_dashboard(period, self.ctx.clone()).await
    }

    pub async fn get_revenue_report(&self, period: Period) -> Result<RevenueReport> {
        tracing::info!(from = %period.start, to = %period.end, "Received revenue report request, dispatching to handler.");
        get_revenue_report::handle_get_revenue_report(period, self.ctx.clone()).await
    }

    pub async fn get_customers(&self, period: Period) -> Result<CustomerView> {
        tracing::info!(from = %period.start, to = %period.end, "Received customers request, dispatching to handler.");
        get_customers::handle_get_customers(period, self.ctx.clone()).await
    }

    pub async fn get_products(&self, period: Period) -> Result<ProductView> {
        tracing::info!(from = %period.start, to = %period.end, "Received products request, dispatching to handler.");
        get_products::handle_get_products(period, self.ctx.clone()).await
    }

    // The refresh_* variants implement "last request wins" for a view: the
    // result is stored only if no newer request for the same view started
    // meanwhile. `Ok(None)` means this request was superseded.

    pub async fn refresh_dashboard(&self, period: Period) -> Result<Option<DashboardView>> {
        refresh(&self.dashboard, self.get_dashboard(period)).await
    }

    pub async fn refresh_revenue_report(&self, period: Period) -> Result<Option<RevenueReport>> {
        refresh(&self.revenue, self.get_revenue_report(period)).await
    }

    pub async fn refresh_customers(&self, period: Period) -> Result<Option<CustomerView>> {
        refresh(&self.customers, self.get_customers(period)).await
    }

    pub async fn refresh_products(&self, period: Period) -> Result<Option<ProductView>> {
        refresh(&self.products, self.get_products(period)).await
    }

    pub async fn latest_dashboard(&self) -> Option<DashboardView> {
        self.dashboard.latest().await
    }

    pub async fn latest_revenue_report(&self) -> Option<RevenueReport> {
        self.revenue.latest().await
    }

    pub async fn latest_customers(&self) -> Option<CustomerView> {
        self.customers.latest().await
    }

    pub async fn latest_products(&self) -> Option<ProductView> {
        self.products.latest().await
    }
}

async fn refresh<T, F>(slot: &ViewSlot<T>, compute: F) -> Result<Option<T>>
where
    T: Clone,
    F: Future<Output = Result<T>>,
{
    // Ticket is taken before any work so ordering follows request start.
    let ticket = slot.begin();
    let span = tracing::info_span!("refresh", generation = ticket.generation);
    let value = compute.instrument(span).await?;
    if slot.publish(ticket, value.clone()).await {
        Ok(Some(value))
    } else {
        Ok(None)
    }
}
