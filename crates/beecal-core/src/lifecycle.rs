//! # Lifecycle Module
//!
//! Dated biological stages of one queen, from the egg being laid to the
//! final laying check.
//!
//! A [`QueenLifecycle`] is built once from a birth date and is read-only
//! afterwards. Construction goes through [`QueenLifecycle::new`] (or an
//! explicit [`QueenLifecycle::validate`]) so that ordering mistakes are
//! rejected before anything is projected.

use crate::error::{CalendarError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of royal-jelly feeding days in the larva stage.
pub const FEEDING_DAYS: usize = 5;

// =============================================================================
// STAGE RECORDS
// =============================================================================

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Check whether `day` falls inside the range (both ends included).
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

/// The three egg days: standing, tilted, lying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EggStage {
    pub day0_standing: NaiveDate,
    pub day1_tilted: NaiveDate,
    pub day2_lying: NaiveDate,
}

/// Hatching, five feeding days, then the cell is sealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LarvaStage {
    pub hatch_date: NaiveDate,
    pub feeding_days: [NaiveDate; FEEDING_DAYS],
    pub sealed_date: NaiveDate,
}

/// Sealed-cell period plus the day the beekeeper should select cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PupaStage {
    pub period: DateRange,
    pub selection_date: NaiveDate,
}

/// Five sequential windows of the adult queen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdultStage {
    pub emergence: DateRange,
    pub maturation: DateRange,
    pub mating_flight: DateRange,
    pub insemination: DateRange,
    pub check_laying: DateRange,
}

impl AdultStage {
    /// Windows in chronological order, with their names.
    pub fn windows(&self) -> [(&'static str, DateRange); 5] {
        [
            ("emergence", self.emergence),
            ("maturation", self.maturation),
            ("mating flight", self.mating_flight),
            ("insemination", self.insemination),
            ("check laying", self.check_laying),
        ]
    }
}

// =============================================================================
// QUEEN LIFECYCLE
// =============================================================================

/// Full calendar of one queen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueenLifecycle {
    pub birth_date: NaiveDate,
    pub egg: EggStage,
    pub larva: LarvaStage,
    pub pupa: PupaStage,
    pub adult: AdultStage,
}

impl QueenLifecycle {
    /// Build a lifecycle, rejecting it if any invariant is broken.
    pub fn new(
        birth_date: NaiveDate,
        egg: EggStage,
        larva: LarvaStage,
        pupa: PupaStage,
        adult: AdultStage,
    ) -> Result<Self> {
        let lifecycle = Self {
            birth_date,
            egg,
            larva,
            pupa,
            adult,
        };
        lifecycle.validate()?;
        Ok(lifecycle)
    }

    /// Check the construction invariants.
    ///
    /// - every range has `start <= end`
    /// - nothing precedes the birth date
    /// - egg, larva and pupa milestones never go backwards, and the pupa
    ///   period ends no later than emergence starts
    /// - the selection date lies inside the pupa period
    /// - adult windows do not overlap
    pub fn validate(&self) -> Result<()> {
        let result = self.check_invariants();
        if let Err(ref err) = result {
            tracing::debug!(birth_date = %self.birth_date, error = %err, "rejected lifecycle");
        }
        result
    }

    fn check_invariants(&self) -> Result<()> {
        let ranges = std::iter::once(("pupa period", self.pupa.period)).chain(self.adult.windows());
        for (name, range) in ranges {
            if range.start > range.end {
                return Err(CalendarError::malformed(format!(
                    "{name} starts {} after it ends {}",
                    range.start, range.end
                )));
            }
        }

        if self.egg.day0_standing < self.birth_date {
            return Err(CalendarError::malformed(format!(
                "egg laid {} before birth date {}",
                self.egg.day0_standing, self.birth_date
            )));
        }

        let chain = self.development_chain();
        for pair in chain.windows(2) {
            let (prev_name, prev) = pair[0];
            let (next_name, next) = pair[1];
            if next < prev {
                return Err(CalendarError::malformed(format!(
                    "{next_name} ({next}) precedes {prev_name} ({prev})"
                )));
            }
        }

        if !self.pupa.period.contains(self.pupa.selection_date) {
            return Err(CalendarError::malformed(format!(
                "selection date {} outside pupa period {}..={}",
                self.pupa.selection_date, self.pupa.period.start, self.pupa.period.end
            )));
        }

        let windows = self.adult.windows();
        for pair in windows.windows(2) {
            let (prev_name, prev) = pair[0];
            let (next_name, next) = pair[1];
            if next.start <= prev.end {
                return Err(CalendarError::malformed(format!(
                    "{next_name} starting {} overlaps {prev_name} ending {}",
                    next.start, prev.end
                )));
            }
        }

        Ok(())
    }

    /// Milestones from laying to emergence that must be non-decreasing.
    fn development_chain(&self) -> Vec<(&'static str, NaiveDate)> {
        const FEEDING: [&str; FEEDING_DAYS] = [
            "feeding day 1",
            "feeding day 2",
            "feeding day 3",
            "feeding day 4",
            "feeding day 5",
        ];

        let mut chain = vec![
            ("egg day 1", self.egg.day0_standing),
            ("egg day 2", self.egg.day1_tilted),
            ("egg day 3", self.egg.day2_lying),
            ("larva hatch", self.larva.hatch_date),
        ];
        chain.extend(FEEDING.into_iter().zip(self.larva.feeding_days));
        chain.extend([
            ("cell sealing", self.larva.sealed_date),
            ("pupa start", self.pupa.period.start),
            ("pupa end", self.pupa.period.end),
            ("emergence", self.adult.emergence.start),
        ]);
        chain
    }

    /// Last day of the cycle (end of the laying check).
    #[must_use]
    pub fn completion_date(&self) -> NaiveDate {
        self.adult.check_laying.end
    }
}

// =============================================================================
// TESTS
// =============================================================================
