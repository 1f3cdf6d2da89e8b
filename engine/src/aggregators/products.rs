// Product catalogue view: full ranking, monthly evolution, categories
use super::keys::{CategoryName, ProductName};
use super::{group_by, sort_desc_by};
use shared::models::{MonthKey, ProductRecord};
use shared::views::{CategoryTotal, ProductMonth, ProductRank};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Default)]
struct ProductSums {
    code: String,
    units_sold: f64,
    amount: f64,
}

/// Every product in the period by units sold. The code is the first one seen
/// for the name.
pub fn product_ranking(records: &[ProductRecord]) -> Vec<ProductRank> {
    let mut ranking: Vec<ProductRank> = group_by(
        records,
        |r| ProductName(r.name.clone()),
        |acc: &mut ProductSums, r| {
            if acc.code.is_empty() {
                acc.code = r.code.clone();
            }
            acc.units_sold += r.units_sold;
            acc.amount += r.amount;
        },
    )
    .into_entries()
    .into_iter()
    .map(|(name, sums)| ProductRank {
        code: sums.code,
        name: name.0,
        units_sold: sums.units_sold,
        amount: sums.amount,
    })
    .collect();
    sort_desc_by(&mut ranking, |p| p.units_sold);
    ranking
}

pub fn monthly_products(records: &[ProductRecord]) -> Vec<ProductMonth> {
    records
        .iter()
        .fold(BTreeMap::<MonthKey, (f64, f64)>::new(), |mut months, r| {
            let entry = months.entry(r.date.month_key()).or_default();
            entry.0 += r.units_sold;
            entry.1 += r.amount;
            months
        })
        .into_iter()
        .map(|(month, (units_sold, amount))| ProductMonth {
            month: month.to_string(),
            units_sold,
            amount,
        })
        .collect()
}

/// Category of a product: the first word of its name.
pub fn category_of(name: &str) -> CategoryName {
    CategoryName(name.split(' ').next().unwrap_or_default().to_string())
}

/// Categories by revenue, largest first, at most `limit`.
pub fn top_categories(records: &[ProductRecord], limit: usize) -> Vec<CategoryTotal> {
    let mut categories: Vec<CategoryTotal> = group_by(
        records,
        |r| category_of(&r.name),
        |acc: &mut (f64, f64), r| {
            acc.0 += r.units_sold;
            acc.1 += r.amount;
        },
    )
    .into_entries()
    .into_iter()
    .map(|(name, (units_sold, amount))| CategoryTotal {
        name: name.0,
        units_sold,
        amount,
    })
    .collect();
    sort_desc_by(&mut categories, |c| c.amount);
    categories.truncate(limit);
    categories
}
