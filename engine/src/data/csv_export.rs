// Writes view tables as CSV, one serialized struct per row.
use crate::error::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;

pub fn write_table<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<()> {
    let mut wrt = WriterBuilder::new().has_headers(true).from_writer(writer);
    for row in rows {
        wrt.serialize(row)?;
    }
    wrt.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CalendarDate;
    use shared::views::{CustomerRank, ProductRank};

    #[test]
    fn test_writes_header_and_rows() {
        let rows = vec![ProductRank {
            code: "12".to_string(),
            name: "AMÊNDOA, TORRADA".to_string(),
            units_sold: 3.0,
            amount: 135.0,
        }];
        let mut out = Vec::new();
        write_table(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("code,name,unitsSold,amount"));
        assert_eq!(lines.next(), Some("12,\"AMÊNDOA, TORRADA\",3.0,135.0"));
    }

    #[test]
    fn test_dates_are_flat_and_missing_dates_empty() {
        let rows = vec![
            CustomerRank {
                name: "ANA".to_string(),
                purchases: 2,
                total: 10.0,
                ticket: 5.0,
                last_purchase: Some(CalendarDate::new(2, 3, 2023)),
            },
            CustomerRank {
                name: "BIA".to_string(),
                purchases: 1,
                total: 4.0,
                ticket: 4.0,
                last_purchase: None,
            },
        ];
        let mut out = Vec::new();
        write_table(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("ANA,2,10.0,5.0,02/03/2023"));
        assert!(text.lines().any(|l| l == "BIA,1,4.0,4.0,"));
    }

    #[test]
    fn test_empty_table_writes_nothing() {
        let rows: Vec<ProductRank> = Vec::new();
        let mut out = Vec::new();
        write_table(&mut out, &rows).unwrap();
        assert!(out.is_empty());
    }
}
