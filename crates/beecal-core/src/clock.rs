//! # Clock Module
//!
//! Source of "today" for the projectors. Core never reads the wall clock
//! itself; the binary supplies a system clock, tests supply [`FixedClock`].

use chrono::NaiveDate;

/// Supplies the current calendar date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// A clock stopped on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
