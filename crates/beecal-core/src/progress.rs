//! # Progress Module
//!
//! Projects a lifecycle onto one day: which stage is active, how far along
//! it is, and whether the beekeeper has to act today.
//!
//! Stage resolution is first-match-wins against `today`:
//!
//! ```text
//! today <= egg.day2_lying          -> Egg
//! today <= larva.sealed_date       -> Larva
//! today <= pupa.period.end         -> Pupa   (action on selection day)
//! today <= adult.check_laying.end  -> Adult  (action from laying check on)
//! otherwise                        -> Completed
//! ```

use crate::clock::Clock;
use crate::labels::{AdultPhase, Locale};
use crate::lifecycle::QueenLifecycle;
use crate::timeline::{TimelineEntry, timeline_with};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stage active on the projected day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Egg,
    Larva,
    Pupa,
    Adult,
    Completed,
}

/// Current-stage view of a lifecycle on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageProgress {
    pub stage: Stage,
    /// "Day N" within the active stage, or the completion title.
    pub title: String,
    pub description: String,
    /// Share of the active stage elapsed, in `[0.0, 1.0]`.
    pub progress: f32,
    pub is_action_required: bool,
    pub remaining_days_text: String,
}

/// Whole calendar days from `start` to `end` (negative if `end` is earlier).
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days()
}

/// Projects lifecycles with labels in one locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Projector {
    locale: Locale,
}

impl Projector {
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Current stage of `lifecycle` on `today`.
    pub fn project(&self, lifecycle: &QueenLifecycle, today: NaiveDate) -> StageProgress {
        let labels = self.locale;
        let egg = &lifecycle.egg;
        let larva = &lifecycle.larva;
        let pupa = &lifecycle.pupa;
        let adult = &lifecycle.adult;

        // Egg, larva and pupa all count down to the end of the pupa stage.
        // Kept as-is: it reads as "days until emergence", not per-stage.
        let to_pupa_end = labels.remaining_days(days_between(today, pupa.period.end));

        if today <= egg.day2_lying {
            StageSpan::new(egg.day0_standing, egg.day2_lying).view(
                Stage::Egg,
                today,
                labels,
                labels.egg_stage(),
                false,
                to_pupa_end,
            )
        } else if today <= larva.sealed_date {
            StageSpan::new(larva.hatch_date, larva.sealed_date).view(
                Stage::Larva,
                today,
                labels,
                labels.larva_stage(),
                false,
                to_pupa_end,
            )
        } else if today <= pupa.period.end {
            StageSpan::new(pupa.period.start, pupa.period.end).view(
                Stage::Pupa,
                today,
                labels,
                labels.pupa_stage(),
                today == pupa.selection_date,
                to_pupa_end,
            )
        } else if today <= adult.check_laying.end {
            let phase = adult_phase(lifecycle, today);
            let remaining = labels.remaining_days(days_between(today, adult.check_laying.end));
            StageSpan::new(adult.emergence.start, adult.check_laying.end).view(
                Stage::Adult,
                today,
                labels,
                labels.adult_phase(phase),
                phase == AdultPhase::LayingCheck,
                remaining,
            )
        } else {
            StageProgress {
                stage: Stage::Completed,
                title: labels.completed_title().to_string(),
                description: labels.completed_description().to_string(),
                progress: 1.0,
                is_action_required: false,
                remaining_days_text: labels.cycle_complete().to_string(),
            }
        }
    }

    /// Dated milestones of `lifecycle`, flagged relative to `today`.
    pub fn timeline(&self, lifecycle: &QueenLifecycle, today: NaiveDate) -> Vec<TimelineEntry> {
        timeline_with(self.locale, lifecycle, today)
    }

    /// [`Projector::project`] for the clock's current day.
    pub fn project_now(&self, lifecycle: &QueenLifecycle, clock: &impl Clock) -> StageProgress {
        self.project(lifecycle, clock.today())
    }

    /// [`Projector::timeline`] for the clock's current day.
    pub fn timeline_now(
        &self,
        lifecycle: &QueenLifecycle,
        clock: &impl Clock,
    ) -> Vec<TimelineEntry> {
        self.timeline(lifecycle, clock.today())
    }
}

/// Current stage of `lifecycle` on `today`, with English labels.
pub fn project(lifecycle: &QueenLifecycle, today: NaiveDate) -> StageProgress {
    Projector::default().project(lifecycle, today)
}

// =============================================================================
// HELPERS
// =============================================================================

/// First and last day of the active stage.
struct StageSpan {
    start: NaiveDate,
    end: NaiveDate,
}

impl StageSpan {
    fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    fn view(
        &self,
        stage: Stage,
        today: NaiveDate,
        labels: Locale,
        description: &str,
        is_action_required: bool,
        remaining_days_text: String,
    ) -> StageProgress {
        let current = days_between(self.start, today) + 1;
        let total = days_between(self.start, self.end) + 1;
        StageProgress {
            stage,
            // Days before the stage starts still read "Day 1".
            title: labels.day_title(current.max(1)),
            description: description.to_string(),
            progress: ratio(current, total),
            is_action_required,
            remaining_days_text,
        }
    }
}

/// `current / total`, clamped to `[0.0, 1.0]`.
#[allow(clippy::float_arithmetic)]
fn ratio(current: i64, total: i64) -> f32 {
    if total <= 0 {
        return 1.0;
    }
    (current as f32 / total as f32).clamp(0.0, 1.0)
}

fn adult_phase(lifecycle: &QueenLifecycle, today: NaiveDate) -> AdultPhase {
    let adult = &lifecycle.adult;
    if today < adult.maturation.start {
        AdultPhase::Emergence
    } else if today < adult.mating_flight.start {
        AdultPhase::Maturation
    } else if today < adult.insemination.start {
        AdultPhase::MatingFlight
    } else if today < adult.check_laying.start {
        AdultPhase::Insemination
    } else {
        AdultPhase::LayingCheck
    }
}

// =============================================================================
// TESTS
// =============================================================================
