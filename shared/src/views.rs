// Response shapes handed to the presentation layer, one group per view.
use crate::models::CalendarDate;
use serde::{Deserialize, Serialize};

/// A headline figure with optional change against the previous period.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub value: f64,
    pub delta: Option<f64>,
    pub delta_abs: Option<f64>,
}

impl Kpi {
    pub fn plain(value: f64) -> Self {
        Self {
            value,
            delta: None,
            delta_abs: None,
        }
    }
}

/// One point of a per-day series; `day` is a "DD/MM" or weekday label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub day: String,
    pub value: f64,
}

/// Point of the dashboard's sales-by-hour chart. The sheets have no time of
/// day, so `hour` carries the "DD/MM" day label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourPoint {
    pub hour: String,
    pub value: f64,
}

// Dashboard

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardKpis {
    pub faturamento: Kpi,
    pub vendas: Kpi,
    pub ticket_medio: Kpi,
    pub atendimentos: Kpi,
    pub taxa_atendimento: Kpi,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentShare {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelShare {
    pub label: String,
    pub value: f64,
    pub delta: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    pub rank: usize,
    pub name: String,
    pub qty: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopClient {
    pub rank: usize,
    pub initials: String,
    pub name: String,
    pub sub: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub kpis: DashboardKpis,
    pub payments: Vec<PaymentShare>,
    pub channels: Vec<ChannelShare>,
    /// Sum of the signed payment shares.
    pub payments_net: f64,
    pub sales_by_hour: Vec<HourPoint>,
    pub sales_by_day: Vec<SeriesPoint>,
    pub top_products: Vec<TopProduct>,
    pub top_clients: Vec<TopClient>,
}

// Revenue report

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    pub faturamento: Kpi,
    pub vendas: Kpi,
    pub ticket_medio: Kpi,
    pub devolucao: Kpi,
    pub media_diaria: Kpi,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueDayRow {
    pub date: CalendarDate,
    pub sale_count: u32,
    pub avg_ticket: f64,
    pub refund_amount: f64,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RevenueReport {
    pub summary: RevenueSummary,
    pub days: Vec<RevenueDayRow>,
    pub chart: Vec<SeriesPoint>,
}

// Customers

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRank {
    pub name: String,
    pub purchases: u32,
    pub total: f64,
    pub ticket: f64,
    pub last_purchase: Option<CalendarDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InactiveCustomer {
    pub name: String,
    pub purchases: u32,
    pub total: f64,
    pub ticket: f64,
    pub days_without_purchase: i64,
    pub last_purchase: CalendarDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerMonth {
    pub month: String,
    pub total: f64,
    pub customers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendBucket {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceBucket {
    pub purchases: String,
    pub customers: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerView {
    pub ranking: Vec<CustomerRank>,
    pub inactive: Vec<InactiveCustomer>,
    pub monthly: Vec<CustomerMonth>,
    pub spend_buckets: Vec<SpendBucket>,
    pub recurrence: Vec<RecurrenceBucket>,
    pub unique_customers: usize,
    pub total_spend: f64,
    pub avg_spend_per_customer: f64,
}

// Products

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRank {
    pub code: String,
    pub name: String,
    pub units_sold: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMonth {
    pub month: String,
    pub units_sold: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub name: String,
    pub units_sold: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub ranking: Vec<ProductRank>,
    pub monthly: Vec<ProductMonth>,
    pub categories: Vec<CategoryTotal>,
    pub total_units: f64,
    pub total_revenue: f64,
    pub distinct_products: usize,
}
