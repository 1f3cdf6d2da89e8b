// Source of "today" for inactivity windows
use shared::models::CalendarDate;

pub trait Clock: Send + Sync {
    fn today(&self) -> CalendarDate;
}

/// Local calendar day of the machine running the engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        CalendarDate::from_naive(chrono::Local::now().date_naive())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub CalendarDate);

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        self.0
    }
}
