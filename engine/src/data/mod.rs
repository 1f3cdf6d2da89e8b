// Raw sheet access, tokenizing and date-range filtering
pub mod csv_export;
pub mod csv_parser;
pub mod period;
pub mod sheet_source;

pub use csv_parser::{tokenize_line, tokenize_sheet, Row};
pub use period::filter_by_period;
pub use sheet_source::{FileSheetSource, SheetSource, StaticSheetSource};
