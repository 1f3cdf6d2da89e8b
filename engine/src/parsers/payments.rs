// Payments sheet: a date row opens a group, method rows below it belong to that day.
// 01/03/2023 | R$ 1.300,00   <- group total, only moves the cursor
// Dinheiro   | R$ 327,00
use super::{cell, RowClass, RowParser};
use crate::data::csv_parser::brazilian_format::{is_date_row, parse_currency, parse_date};
use crate::data::Row;
use shared::models::{CalendarDate, PaymentRecord};

const HEADER_PREFIX: &str = "Método";

#[derive(Debug, Default, Clone, Copy)]
pub struct PaymentParser;

impl PaymentParser {
    fn extract(row: &[String], date: CalendarDate) -> PaymentRecord {
        PaymentRecord {
            date,
            method: cell(row, 0).to_string(),
            amount: parse_currency(cell(row, 1)),
        }
    }
}

impl RowParser for PaymentParser {
    type Record = PaymentRecord;

    fn name(&self) -> &str {
        "payments"
    }

    fn classify(&self, row: &[String]) -> RowClass {
        let first = cell(row, 0);
        if first.is_empty() {
            RowClass::Blank
        } else if first.starts_with(HEADER_PREFIX) {
            RowClass::Header
        } else if is_date_row(first) {
            RowClass::DateMarker(parse_date(first))
        } else if !cell(row, 1).is_empty() {
            RowClass::Data
        } else {
            RowClass::Unrecognized
        }
    }

    fn parse(&self, rows: &[Row]) -> Vec<PaymentRecord> {
        let (_, records) = rows.iter().fold(
            (None::<CalendarDate>, Vec::new()),
            |(cursor, mut records), row| match self.classify(row) {
                RowClass::DateMarker(date) => (date, records),
                RowClass::Data => {
                    match cursor {
                        Some(date) => records.push(Self::extract(row, date)),
                        None => tracing::warn!(
                            parser = self.name(),
                            method = %cell(row, 0),
                            "Payment row before any date marker, dropped"
                        ),
                    }
                    (cursor, records)
                }
                _ => (cursor, records),
            },
        );
        tracing::debug!(parser = self.name(), rows = rows.len(), records = records.len(), "Parsed sheet");
        records
    }
}
