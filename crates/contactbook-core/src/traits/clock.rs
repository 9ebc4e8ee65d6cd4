//! Source of "today" for date-window queries.

use chrono::NaiveDate;

/// Supplies the current calendar date.
pub trait Clock: Send + Sync + std::fmt::Debug + 'static {
    fn today(&self) -> NaiveDate;
}

/// Reads the host's local date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
