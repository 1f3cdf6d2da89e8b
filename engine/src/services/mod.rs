// Dashboard assembly: fetch, parse, filter, aggregate per view
pub mod dashboard_service;
pub mod view_state;

pub use dashboard_service::{DashboardService, ViewContext};
pub use view_state::{RequestTicket, ViewSlot};
