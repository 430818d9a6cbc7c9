//! # Timeline Module
//!
//! Flattens a lifecycle into dated, named milestones for calendar display.
//!
//! The emission order is fixed (egg, larva, pupa, adult) and is also the
//! chronological order for any lifecycle that passes validation.

use crate::labels::Locale;
use crate::lifecycle::QueenLifecycle;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of entries in every timeline: 3 egg + 7 larva + 3 pupa + 6 adult.
pub const TIMELINE_LEN: usize = 19;

/// Display category of a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneKind {
    Egg,
    Larva,
    Pupa,
    Queen,
    /// The beekeeper has to do something on this day.
    Attention,
}

/// A named point in the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Milestone {
    EggStanding,
    EggTilted,
    EggLying,
    Hatch,
    /// Feeding day, numbered from 1.
    Feeding(u8),
    Sealed,
    PupaStart,
    Selection,
    PupaEnd,
    Emergence,
    Maturation,
    MatingFlight,
    Insemination,
    CheckLayingStart,
    CheckLayingEnd,
}

impl Milestone {
    #[must_use]
    pub fn kind(self) -> MilestoneKind {
        match self {
            Self::EggStanding | Self::EggTilted | Self::EggLying => MilestoneKind::Egg,
            Self::Hatch | Self::Feeding(_) => MilestoneKind::Larva,
            Self::Sealed | Self::PupaStart | Self::PupaEnd => MilestoneKind::Pupa,
            Self::Selection | Self::CheckLayingStart => MilestoneKind::Attention,
            Self::Emergence
            | Self::Maturation
            | Self::MatingFlight
            | Self::Insemination
            | Self::CheckLayingEnd => MilestoneKind::Queen,
        }
    }
}

/// One row of the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub date: NaiveDate,
    /// "day month-name" in the projector's locale.
    pub formatted_date: String,
    pub title: String,
    pub description: String,
    pub stage_type: MilestoneKind,
    pub is_today: bool,
    pub is_completed: bool,
}

/// Milestones of `lifecycle` with their dates, in emission order.
pub fn milestones(lifecycle: &QueenLifecycle) -> [(Milestone, NaiveDate); TIMELINE_LEN] {
    let egg = &lifecycle.egg;
    let larva = &lifecycle.larva;
    let pupa = &lifecycle.pupa;
    let adult = &lifecycle.adult;
    let feed = |i: usize| (Milestone::Feeding((i + 1) as u8), larva.feeding_days[i]);

    [
        (Milestone::EggStanding, egg.day0_standing),
        (Milestone::EggTilted, egg.day1_tilted),
        (Milestone::EggLying, egg.day2_lying),
        (Milestone::Hatch, larva.hatch_date),
        feed(0),
        feed(1),
        feed(2),
        feed(3),
        feed(4),
        (Milestone::Sealed, larva.sealed_date),
        (Milestone::PupaStart, pupa.period.start),
        (Milestone::Selection, pupa.selection_date),
        (Milestone::PupaEnd, pupa.period.end),
        (Milestone::Emergence, adult.emergence.start),
        (Milestone::Maturation, adult.maturation.start),
        (Milestone::MatingFlight, adult.mating_flight.start),
        (Milestone::Insemination, adult.insemination.start),
        (Milestone::CheckLayingStart, adult.check_laying.start),
        (Milestone::CheckLayingEnd, adult.check_laying.end),
    ]
}

/// Timeline of `lifecycle` relative to `today`, with English labels.
pub fn timeline(lifecycle: &QueenLifecycle, today: NaiveDate) -> Vec<TimelineEntry> {
    timeline_with(Locale::En, lifecycle, today)
}

pub(crate) fn timeline_with(
    locale: Locale,
    lifecycle: &QueenLifecycle,
    today: NaiveDate,
) -> Vec<TimelineEntry> {
    milestones(lifecycle)
        .into_iter()
        .map(|(milestone, date)| {
            let (title, description) = locale.milestone(milestone);
            TimelineEntry {
                date,
                formatted_date: locale.format_day_month(date),
                title,
                description: description.to_string(),
                stage_type: milestone.kind(),
                is_today: date == today,
                is_completed: date < today,
            }
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::calendar::derive_lifecycle;
    use crate::progress::Projector;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn lifecycle() -> QueenLifecycle {
        derive_lifecycle(date(2024, 1, 1)).unwrap()
    }

    #[test]
    fn always_nineteen_entries() {
        let entries = timeline(&lifecycle(), date(2024, 1, 10));
        assert_eq!(entries.len(), TIMELINE_LEN);
    }

    #[test]
    fn entries_are_chronological() {
        let entries = timeline(&lifecycle(), date(2024, 1, 10));
        assert!(entries.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn stage_types_follow_emission_order() {
        use MilestoneKind::{Attention, Egg, Larva, Pupa, Queen};

        let kinds: Vec<_> = timeline(&lifecycle(), date(2024, 1, 1))
            .into_iter()
            .map(|e| e.stage_type)
            .collect();
        assert_eq!(
            kinds,
            vec![
                Egg, Egg, Egg, Larva, Larva, Larva, Larva, Larva, Larva, Pupa, Pupa, Attention,
                Pupa, Queen, Queen, Queen, Queen, Attention, Queen,
            ]
        );
    }

    #[test]
    fn today_and_completed_flags() {
        let today = date(2024, 1, 4);
        let entries = timeline(&lifecycle(), today);

        let todays: Vec<_> = entries.iter().filter(|e| e.is_today).collect();
        assert_eq!(todays.len(), 1);
        assert_eq!(todays[0].title, "Larva: Hatching");

        assert_eq!(entries.iter().filter(|e| e.is_completed).count(), 3);
        assert!(entries.iter().all(|e| !(e.is_today && e.is_completed)));
    }

    #[test]
    fn no_entry_is_today_between_milestones() {
        // Jan 11 falls inside the pupa period with no milestone of its own
        let entries = timeline(&lifecycle(), date(2024, 1, 11));
        assert!(entries.iter().all(|e| !e.is_today));
    }

    #[test]
    fn feeding_days_are_numbered() {
        let entries = timeline(&lifecycle(), date(2024, 1, 1));
        let titles: Vec<_> = entries[4..9].iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Larva: Day 1",
                "Larva: Day 2",
                "Larva: Day 3",
                "Larva: Day 4",
                "Larva: Day 5",
            ]
        );
    }

    #[test]
    fn russian_timeline_formats_dates() {
        let entries = Projector::new(Locale::Ru).timeline(&lifecycle(), date(2024, 1, 1));
        assert_eq!(entries[0].formatted_date, "1 января");
        assert_eq!(entries[0].title, "Яйцо: День 1");
        assert_eq!(entries[11].title, "Отбор маточников");
    }

    #[test]
    fn english_timeline_formats_dates() {
        let entries = timeline(&lifecycle(), date(2024, 1, 1));
        assert_eq!(entries[0].formatted_date, "1 January");
        assert_eq!(entries[18].formatted_date, "30 January");
    }

    #[test]
    fn everything_completed_after_cycle() {
        let entries = timeline(&lifecycle(), date(2024, 2, 1));
        assert!(entries.iter().all(|e| e.is_completed && !e.is_today));
    }
}
