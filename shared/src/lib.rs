pub mod models;
pub mod utils;
pub mod views;

pub use models::{
    CalendarDate, CustomerRecord, Dated, MonthKey, PaymentRecord, Period, ProductRecord,
    RevenueRecord,
};
