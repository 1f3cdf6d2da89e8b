// Daily revenue sheet
// Data       | Vendas | Ticket Médio | Devolução | Valor Total
// 01/03/2023 | 6      | R$ 216,67    | R$ 0,00   | R$ 1.300,00
use super::{cell, starts_with_any, RowClass, RowParser};
use crate::data::csv_parser::brazilian_format::{is_date_row, parse_count, parse_currency, parse_date};
use crate::data::Row;
use shared::models::RevenueRecord;

const HEADER_PREFIXES: [&str; 2] = ["Data", "Total"];

#[derive(Debug, Default, Clone, Copy)]
pub struct RevenueParser;

impl RevenueParser {
    // Column contract for the revenue layout.
    fn extract(row: &[String]) -> Option<RevenueRecord> {
        Some(RevenueRecord {
            date: parse_date(cell(row, 0))?,
            sale_count: parse_count(cell(row, 1)),
            avg_ticket: parse_currency(cell(row, 2)),
            refund_amount: parse_currency(cell(row, 3)),
            total_amount: parse_currency(cell(row, 4)),
        })
    }
}

impl RowParser for RevenueParser {
    type Record = RevenueRecord;

    fn name(&self) -> &str {
        "revenue"
    }

    fn classify(&self, row: &[String]) -> RowClass {
        let first = cell(row, 0);
        if first.is_empty() {
            RowClass::Blank
        } else if starts_with_any(first, &HEADER_PREFIXES) {
            RowClass::Header
        } else if is_date_row(first) {
            RowClass::Data
        } else {
            RowClass::Unrecognized
        }
    }

    fn parse(&self, rows: &[Row]) -> Vec<RevenueRecord> {
        let records: Vec<RevenueRecord> = rows
            .iter()
            .filter(|row| self.classify(row) == RowClass::Data)
            .filter_map(|row| Self::extract(row))
            .collect();
        tracing::debug!(parser = self.name(), rows = rows.len(), records = records.len(), "Parsed sheet");
        records
    }
}
