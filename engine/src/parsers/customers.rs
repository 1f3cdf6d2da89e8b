// Customers sheet. Two layouts exist in the wild:
// Cliente | Venda | Data       | Valor Total                 (current)
// Cliente | Venda | NF | Data  | ... | Valor Total at col 10  (legacy)
use super::{cell, starts_with_any, RowClass, RowParser};
use crate::data::csv_parser::brazilian_format::{is_date_row, parse_currency, parse_date};
use crate::data::Row;
use shared::models::CustomerRecord;

const HEADER_PREFIXES: [&str; 2] = ["Cliente", "Total"];
const WALK_IN: &str = "consumidor final";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerLayout {
    Current,
    Legacy,
}

impl CustomerLayout {
    /// Picks the layout from where the date sits; the current layout wins.
    pub fn probe(row: &[String]) -> Option<CustomerLayout> {
        [CustomerLayout::Current, CustomerLayout::Legacy]
            .into_iter()
            .find(|layout| is_date_row(cell(row, layout.date_col())))
    }

    pub fn date_col(self) -> usize {
        match self {
            CustomerLayout::Current => 2,
            CustomerLayout::Legacy => 3,
        }
    }

    pub fn total_col(self) -> usize {
        match self {
            CustomerLayout::Current => 3,
            CustomerLayout::Legacy => 10,
        }
    }

    fn extract(self, row: &[String]) -> Option<CustomerRecord> {
        Some(CustomerRecord {
            name: cell(row, 0).to_string(),
            sale_ref: cell(row, 1).to_string(),
            date: parse_date(cell(row, self.date_col()))?,
            amount: parse_currency(cell(row, self.total_col())),
        })
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CustomerParser;

impl RowParser for CustomerParser {
    type Record = CustomerRecord;

    fn name(&self) -> &str {
        "customers"
    }

    fn classify(&self, row: &[String]) -> RowClass {
        let first = cell(row, 0);
        if first.is_empty() {
            RowClass::Blank
        } else if starts_with_any(first, &HEADER_PREFIXES) {
            RowClass::Header
        } else if first.to_lowercase().contains(WALK_IN) {
            RowClass::Excluded
        } else if CustomerLayout::probe(row).is_some() {
            RowClass::Data
        } else {
            RowClass::Unrecognized
        }
    }

    fn parse(&self, rows: &[Row]) -> Vec<CustomerRecord> {
        let records: Vec<CustomerRecord> = rows
            .iter()
            .filter(|row| self.classify(row) == RowClass::Data)
            .filter_map(|row| CustomerLayout::probe(row)?.extract(row))
            .collect();
        tracing::debug!(parser = self.name(), rows = rows.len(), records = records.len(), "Parsed sheet");
        records
    }
}
