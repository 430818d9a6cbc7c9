//! # Calendar Module
//!
//! Birth date -> [`QueenLifecycle`].
//!
//! [`LifecycleSource`] is the seam between the projectors and whatever
//! produces a lifecycle. [`OffsetCalendar`] is the built-in source: every
//! milestone is a fixed number of days after the birth date.

use crate::error::{CalendarError, Result};
use crate::lifecycle::{
    AdultStage, DateRange, EggStage, FEEDING_DAYS, LarvaStage, PupaStage, QueenLifecycle,
};
use chrono::{Days, NaiveDate};

/// Anything that can turn a birth date into a validated lifecycle.
pub trait LifecycleSource {
    /// Produce the lifecycle of a queen born on `birth_date`.
    ///
    /// Implementations must return only lifecycles that pass
    /// [`QueenLifecycle::validate`].
    fn derive(&self, birth_date: NaiveDate) -> Result<QueenLifecycle>;
}

// =============================================================================
// DAY OFFSETS
// =============================================================================

/// Egg days: standing, tilted, lying.
const EGG: [u64; 3] = [0, 1, 2];
/// Larva hatches on day 3.
const LARVA_HATCH: u64 = 3;
/// Five feeding days follow the hatch.
const LARVA_FEEDING: [u64; FEEDING_DAYS] = [4, 5, 6, 7, 8];
/// The cell is sealed on the last feeding day.
const LARVA_SEALED: u64 = 8;
/// Pupa runs from sealing up to the day before emergence.
const PUPA: (u64, u64) = (8, 13);
/// Cells are selected on the last pupa day.
const PUPA_SELECTION: u64 = 13;
const EMERGENCE: (u64, u64) = (14, 15);
const MATURATION: (u64, u64) = (16, 20);
const MATING_FLIGHT: (u64, u64) = (21, 23);
const INSEMINATION: (u64, u64) = (24, 26);
const CHECK_LAYING: (u64, u64) = (27, 29);

/// Lifecycle source using fixed day offsets from the birth date.
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetCalendar;

impl OffsetCalendar {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LifecycleSource for OffsetCalendar {
    fn derive(&self, birth_date: NaiveDate) -> Result<QueenLifecycle> {
        derive_lifecycle(birth_date)
    }
}

/// Derive the full lifecycle of a queen born on `birth_date`.
///
/// Fails only when the last milestone would fall past chrono's maximum date.
pub fn derive_lifecycle(birth_date: NaiveDate) -> Result<QueenLifecycle> {
    let day = |offset: u64| {
        birth_date
            .checked_add_days(Days::new(offset))
            .ok_or(CalendarError::OutOfRange { birth_date })
    };
    let range = |(start, end): (u64, u64)| -> Result<DateRange> {
        Ok(DateRange::new(day(start)?, day(end)?))
    };

    let egg = EggStage {
        day0_standing: day(EGG[0])?,
        day1_tilted: day(EGG[1])?,
        day2_lying: day(EGG[2])?,
    };

    let mut feeding_days = [birth_date; FEEDING_DAYS];
    for (slot, offset) in feeding_days.iter_mut().zip(LARVA_FEEDING) {
        *slot = day(offset)?;
    }
    let larva = LarvaStage {
        hatch_date: day(LARVA_HATCH)?,
        feeding_days,
        sealed_date: day(LARVA_SEALED)?,
    };

    let pupa = PupaStage {
        period: range(PUPA)?,
        selection_date: day(PUPA_SELECTION)?,
    };

    let adult = AdultStage {
        emergence: range(EMERGENCE)?,
        maturation: range(MATURATION)?,
        mating_flight: range(MATING_FLIGHT)?,
        insemination: range(INSEMINATION)?,
        check_laying: range(CHECK_LAYING)?,
    };

    QueenLifecycle::new(birth_date, egg, larva, pupa, adult)
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let invalid = || CalendarError::InvalidDate {
        input: input.to_string(),
    };

    // chrono accepts single-digit fields and signed years; the wire format does not
    let bytes = input.as_bytes();
    let well_shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !well_shaped {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| invalid())
}

// =============================================================================
// TESTS
// =============================================================================
