//! Fixture format: a lifecycle written out field by field, dates as
//! `YYYY-MM-DD` strings.
//!
//! ```json
//! {
//!   "birthDate": "2024-01-01",
//!   "egg":   { "day0Standing": "...", "day1Tilted": "...", "day2Lying": "..." },
//!   "larva": { "hatchDate": "...", "feedingDays": ["...", x5], "sealedDate": "..." },
//!   "pupa":  { "period": { "start": "...", "end": "..." }, "selectionDate": "..." },
//!   "adult": { "emergence": {..}, "maturation": {..}, "matingFlight": {..},
//!              "insemination": {..}, "checkLaying": {..} }
//! }
//! ```

use super::parse_range;
use crate::calendar::parse_date;
use crate::error::{CalendarError, Result};
use crate::lifecycle::{
    AdultStage, DateRange, EggStage, FEEDING_DAYS, LarvaStage, PupaStage, QueenLifecycle,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleFixture {
    pub birth_date: String,
    pub egg: FixtureEgg,
    pub larva: FixtureLarva,
    pub pupa: FixturePupa,
    pub adult: FixtureAdult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureEgg {
    pub day0_standing: String,
    pub day1_tilted: String,
    pub day2_lying: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureLarva {
    pub hatch_date: String,
    pub feeding_days: Vec<String>,
    pub sealed_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixturePupa {
    pub period: FixtureDateRange,
    pub selection_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureAdult {
    pub emergence: FixtureDateRange,
    pub maturation: FixtureDateRange,
    pub mating_flight: FixtureDateRange,
    pub insemination: FixtureDateRange,
    pub check_laying: FixtureDateRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureDateRange {
    pub start: String,
    pub end: String,
}

impl FixtureDateRange {
    fn parse(&self) -> Result<DateRange> {
        parse_range(&self.start, &self.end)
    }
}

impl From<DateRange> for FixtureDateRange {
    fn from(range: DateRange) -> Self {
        Self {
            start: range.start.to_string(),
            end: range.end.to_string(),
        }
    }
}

impl TryFrom<&LifecycleFixture> for QueenLifecycle {
    type Error = CalendarError;

    fn try_from(fixture: &LifecycleFixture) -> Result<Self> {
        let feeding: Vec<_> = fixture
            .larva
            .feeding_days
            .iter()
            .map(|day| parse_date(day))
            .collect::<Result<_>>()?;
        let feeding_days: [_; FEEDING_DAYS] = feeding.try_into().map_err(|days: Vec<_>| {
            CalendarError::malformed(format!(
                "expected {FEEDING_DAYS} feeding days, found {}",
                days.len()
            ))
        })?;

        let egg = EggStage {
            day0_standing: parse_date(&fixture.egg.day0_standing)?,
            day1_tilted: parse_date(&fixture.egg.day1_tilted)?,
            day2_lying: parse_date(&fixture.egg.day2_lying)?,
        };
        let larva = LarvaStage {
            hatch_date: parse_date(&fixture.larva.hatch_date)?,
            feeding_days,
            sealed_date: parse_date(&fixture.larva.sealed_date)?,
        };
        let pupa = PupaStage {
            period: fixture.pupa.period.parse()?,
            selection_date: parse_date(&fixture.pupa.selection_date)?,
        };
        let adult = AdultStage {
            emergence: fixture.adult.emergence.parse()?,
            maturation: fixture.adult.maturation.parse()?,
            mating_flight: fixture.adult.mating_flight.parse()?,
            insemination: fixture.adult.insemination.parse()?,
            check_laying: fixture.adult.check_laying.parse()?,
        };

        QueenLifecycle::new(parse_date(&fixture.birth_date)?, egg, larva, pupa, adult)
    }
}

impl From<&QueenLifecycle> for LifecycleFixture {
    fn from(lifecycle: &QueenLifecycle) -> Self {
        Self {
            birth_date: lifecycle.birth_date.to_string(),
            egg: FixtureEgg {
                day0_standing: lifecycle.egg.day0_standing.to_string(),
                day1_tilted: lifecycle.egg.day1_tilted.to_string(),
                day2_lying: lifecycle.egg.day2_lying.to_string(),
            },
            larva: FixtureLarva {
                hatch_date: lifecycle.larva.hatch_date.to_string(),
                feeding_days: lifecycle
                    .larva
                    .feeding_days
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
                sealed_date: lifecycle.larva.sealed_date.to_string(),
            },
            pupa: FixturePupa {
                period: lifecycle.pupa.period.into(),
                selection_date: lifecycle.pupa.selection_date.to_string(),
            },
            adult: FixtureAdult {
                emergence: lifecycle.adult.emergence.into(),
                maturation: lifecycle.adult.maturation.into(),
                mating_flight: lifecycle.adult.mating_flight.into(),
                insemination: lifecycle.adult.insemination.into(),
                check_laying: lifecycle.adult.check_laying.into(),
            },
        }
    }
}

/// Decode and validate a fixture document.
pub fn decode_fixture(json: &str) -> Result<QueenLifecycle> {
    let fixture: LifecycleFixture = serde_json::from_str(json)?;
    QueenLifecycle::try_from(&fixture)
}

/// Render a lifecycle as a pretty-printed fixture document.
pub fn encode_fixture(lifecycle: &QueenLifecycle) -> Result<String> {
    Ok(serde_json::to_string_pretty(&LifecycleFixture::from(lifecycle))?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::calendar::derive_lifecycle;
    use chrono::NaiveDate;

    fn derived() -> QueenLifecycle {
        derive_lifecycle(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).unwrap()
    }

    #[test]
    fn decodes_encoded_fixture() {
        let lifecycle = derived();
        let json = encode_fixture(&lifecycle).unwrap();
        assert!(json.contains("\"feedingDays\""));
        assert_eq!(decode_fixture(&json).unwrap(), lifecycle);
    }

    #[test]
    fn ignores_unknown_keys() {
        let mut value = serde_json::to_value(LifecycleFixture::from(&derived())).unwrap();
        value["comment"] = serde_json::json!("hand-written");
        let lifecycle = decode_fixture(&value.to_string()).unwrap();
        assert_eq!(lifecycle, derived());
    }

    #[test]
    fn rejects_wrong_feeding_day_count() {
        let mut fixture = LifecycleFixture::from(&derived());
        fixture.larva.feeding_days.pop();
        let json = serde_json::to_string(&fixture).unwrap();

        match decode_fixture(&json) {
            Err(CalendarError::Malformed { invariant }) => {
                assert!(invariant.contains("found 4"));
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_date_string() {
        let mut fixture = LifecycleFixture::from(&derived());
        fixture.egg.day1_tilted = "2024-02-30".to_string();
        let json = serde_json::to_string(&fixture).unwrap();
        assert!(matches!(
            decode_fixture(&json),
            Err(CalendarError::InvalidDate { .. })
        ));
    }

    #[test]
    fn rejects_invalid_lifecycle() {
        let mut fixture = LifecycleFixture::from(&derived());
        fixture.pupa.selection_date = "2024-02-15".to_string();
        let json = serde_json::to_string(&fixture).unwrap();
        assert!(matches!(
            decode_fixture(&json),
            Err(CalendarError::Malformed { .. })
        ));
    }

    #[test]
    fn rejects_truncated_json() {
        assert!(matches!(
            decode_fixture("{\"birthDate\":"),
            Err(CalendarError::Json(_))
        ));
    }
}
