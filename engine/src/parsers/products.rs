// Products sheet
// Código | Produto    | Data       | Quantidade | Valor
// 12     | AMÊNDOA... | 01/03/2023 | 1,00 Un    | R$ 45,00
use super::{cell, starts_with_any, RowClass, RowParser};
use crate::data::csv_parser::brazilian_format::{is_date_row, parse_currency, parse_date};
use crate::data::Row;
use shared::models::ProductRecord;

const HEADER_PREFIXES: [&str; 4] = ["Código", "Cod", "Total", "---"];

#[derive(Debug, Default, Clone, Copy)]
pub struct ProductParser;

impl ProductParser {
    // Quantity goes through the currency normalizer too, it strips the "Un" suffix.
    fn extract(row: &[String]) -> Option<ProductRecord> {
        Some(ProductRecord {
            code: cell(row, 0).to_string(),
            name: cell(row, 1).trim().to_string(),
            date: parse_date(cell(row, 2))?,
            units_sold: parse_currency(cell(row, 3)),
            amount: parse_currency(cell(row, 4)),
        })
    }
}

impl RowParser for ProductParser {
    type Record = ProductRecord;

    fn name(&self) -> &str {
        "products"
    }

    fn classify(&self, row: &[String]) -> RowClass {
        let first = cell(row, 0);
        if first.is_empty() {
            RowClass::Blank
        } else if starts_with_any(first, &HEADER_PREFIXES) {
            RowClass::Header
        } else if cell(row, 1).is_empty() || !is_date_row(cell(row, 2)) {
            RowClass::Unrecognized
        } else {
            RowClass::Data
        }
    }

    fn parse(&self, rows: &[Row]) -> Vec<ProductRecord> {
        let records: Vec<ProductRecord> = rows
            .iter()
            .filter(|row| self.classify(row) == RowClass::Data)
            .filter_map(|row| Self::extract(row))
            .collect();
        tracing::debug!(parser = self.name(), rows = rows.len(), records = records.len(), "Parsed sheet");
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::tokenize_sheet;
    use shared::models::CalendarDate;

    const SHEET: &str = r#"Código,Produto,Data,Quantidade,Valor
12,AMÊNDOA TORRADA,01/03/2023,"1,00 Un","R$ 45,00"
13,CASTANHA,02/03/2023,"2,50 Un","R$ 1.020,00"
---,---,---,---,---
14,,02/03/2023,1,1
15,NOZES,sem data,1,1
Total,,,"3,50 Un","R$ 1.065,00"
"#;

    #[test]
    fn test_parses_product_rows() {
        let records = ProductParser.parse(&tokenize_sheet(SHEET));
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            ProductRecord {
                code: "12".to_string(),
                name: "AMÊNDOA TORRADA".to_string(),
                date: CalendarDate::new(1, 3, 2023),
                units_sold: 1.0,
                amount: 45.0,
            }
        );
        assert_eq!(records[1].units_sold, 2.5);
        assert_eq!(records[1].amount, 1020.0);
    }

    #[test]
    fn test_header_variants() {
        let row = |s: &str| crate::data::tokenize_line(s);
        for header in ["Código,Produto", "Cod.,Produto", "Total,x,01/03/2023", "----,x"] {
            assert_eq!(ProductParser.classify(&row(header)), RowClass::Header, "{}", header);
        }
    }
}
