// Row parsers, one per sheet layout
pub mod customers;
pub mod payments;
pub mod products;
pub mod revenue;

pub use customers::{CustomerLayout, CustomerParser};
pub use payments::PaymentParser;
pub use products::ProductParser;
pub use revenue::RevenueParser;

use crate::data::Row;
use shared::models::CalendarDate;

/// What a sheet row turned out to be, decided from its content alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowClass {
    /// Leading cell is empty.
    Blank,
    /// Column titles, totals and separator lines.
    Header,
    /// Opens a group of rows for one day. `None` when the marker is not a full date.
    DateMarker(Option<CalendarDate>),
    /// Well-formed but intentionally left out (e.g. walk-in sales).
    Excluded,
    /// Nothing this parser knows how to read.
    Unrecognized,
    Data,
}

// Common trait for all sheet parsers
pub trait RowParser {
    type Record;

    fn name(&self) -> &str;

    fn classify(&self, row: &[String]) -> RowClass;

    /// Records in source row order. Rows that cannot be read are dropped.
    fn parse(&self, rows: &[Row]) -> Vec<Self::Record>;
}

/// Cell at `idx`, or "" past the end of a short row.
pub(crate) fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

pub(crate) fn starts_with_any(value: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|p| value.starts_with(p))
}
