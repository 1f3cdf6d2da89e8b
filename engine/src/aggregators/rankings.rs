// Top-N rankings for the dashboard cards
use super::keys::{CustomerName, ProductName};
use super::{group_by, sort_desc_by};
use shared::models::{CustomerRecord, ProductRecord};
use shared::utils::initials;
use shared::views::{TopClient, TopProduct};

const CLIENT_SUBTITLE: &str = "Cliente";

/// Products by units sold, ranks starting at 1. Ties keep sheet order.
pub fn top_products(records: &[ProductRecord], limit: usize) -> Vec<TopProduct> {
    let mut totals = group_by(
        records,
        |r| ProductName(r.name.clone()),
        |acc: &mut f64, r| *acc += r.units_sold,
    )
    .into_entries();
    sort_desc_by(&mut totals, |(_, qty)| *qty);
    totals
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (name, qty))| TopProduct {
            rank: i + 1,
            name: name.0,
            qty,
        })
        .collect()
}

/// Customers by amount spent.
pub fn top_clients(records: &[CustomerRecord], limit: usize) -> Vec<TopClient> {
    let mut totals = group_by(
        records,
        |r| CustomerName(r.name.clone()),
        |acc: &mut f64, r| *acc += r.amount,
    )
    .into_entries();
    sort_desc_by(&mut totals, |(_, total)| *total);
    totals
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (name, value))| TopClient {
            rank: i + 1,
            initials: initials(name.as_str()),
            name: name.0,
            sub: CLIENT_SUBTITLE.to_string(),
            value,
        })
        .collect()
}
