//! Calculation-service format.
//!
//! Request body: `{"start_date": "YYYY-MM-DD"}`.
//! Response: a `status`/`message` envelope whose `data` holds one object per
//! phase with snake_case keys (`egg_phase`, `larva_phase`, `pupa_phase`,
//! `queen_phase`).

use super::parse_range;
use crate::calendar::parse_date;
use crate::error::{CalendarError, Result};
use crate::lifecycle::{AdultStage, EggStage, LarvaStage, PupaStage, QueenLifecycle};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status the service uses for a successful calculation.
const STATUS_SUCCESS: &str = "success";

/// Body of a calendar calculation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcQueenRequest {
    pub start_date: String,
}

impl CalcQueenRequest {
    #[must_use]
    pub fn new(birth_date: NaiveDate) -> Self {
        Self {
            start_date: birth_date.to_string(),
        }
    }
}

/// Response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueenCalendarResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<QueenCalendarDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueenCalendarDto {
    pub start_date: String,
    pub egg_phase: EggPhaseDto,
    pub larva_phase: LarvaPhaseDto,
    pub pupa_phase: PupaPhaseDto,
    pub queen_phase: QueenPhaseDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EggPhaseDto {
    pub standing: String,
    pub tilted: String,
    pub lying: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LarvaPhaseDto {
    pub start: String,
    pub day_1: String,
    pub day_2: String,
    pub day_3: String,
    pub day_4: String,
    pub day_5: String,
    pub sealed: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PupaPhaseDto {
    pub start: String,
    pub end: String,
    pub selection: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueenPhaseDto {
    pub emergence_start: String,
    pub emergence_end: String,
    pub maturation_start: String,
    pub maturation_end: String,
    pub mating_flight_start: String,
    pub mating_flight_end: String,
    pub insemination_start: String,
    pub insemination_end: String,
    pub egg_laying_check_start: String,
    pub egg_laying_check_end: String,
}

impl TryFrom<&QueenCalendarDto> for QueenLifecycle {
    type Error = CalendarError;

    fn try_from(dto: &QueenCalendarDto) -> Result<Self> {
        let egg = EggStage {
            day0_standing: parse_date(&dto.egg_phase.standing)?,
            day1_tilted: parse_date(&dto.egg_phase.tilted)?,
            day2_lying: parse_date(&dto.egg_phase.lying)?,
        };

        let larva_phase = &dto.larva_phase;
        let larva = LarvaStage {
            hatch_date: parse_date(&larva_phase.start)?,
            feeding_days: [
                parse_date(&larva_phase.day_1)?,
                parse_date(&larva_phase.day_2)?,
                parse_date(&larva_phase.day_3)?,
                parse_date(&larva_phase.day_4)?,
                parse_date(&larva_phase.day_5)?,
            ],
            sealed_date: parse_date(&larva_phase.sealed)?,
        };

        let pupa = PupaStage {
            period: parse_range(&dto.pupa_phase.start, &dto.pupa_phase.end)?,
            selection_date: parse_date(&dto.pupa_phase.selection)?,
        };

        let q = &dto.queen_phase;
        let adult = AdultStage {
            emergence: parse_range(&q.emergence_start, &q.emergence_end)?,
            maturation: parse_range(&q.maturation_start, &q.maturation_end)?,
            mating_flight: parse_range(&q.mating_flight_start, &q.mating_flight_end)?,
            insemination: parse_range(&q.insemination_start, &q.insemination_end)?,
            check_laying: parse_range(&q.egg_laying_check_start, &q.egg_laying_check_end)?,
        };

        QueenLifecycle::new(parse_date(&dto.start_date)?, egg, larva, pupa, adult)
    }
}

impl From<&QueenLifecycle> for QueenCalendarDto {
    fn from(l: &QueenLifecycle) -> Self {
        let [day_1, day_2, day_3, day_4, day_5] = l.larva.feeding_days.map(|d| d.to_string());
        Self {
            start_date: l.birth_date.to_string(),
            egg_phase: EggPhaseDto {
                standing: l.egg.day0_standing.to_string(),
                tilted: l.egg.day1_tilted.to_string(),
                lying: l.egg.day2_lying.to_string(),
            },
            larva_phase: LarvaPhaseDto {
                start: l.larva.hatch_date.to_string(),
                day_1,
                day_2,
                day_3,
                day_4,
                day_5,
                sealed: l.larva.sealed_date.to_string(),
            },
            pupa_phase: PupaPhaseDto {
                start: l.pupa.period.start.to_string(),
                end: l.pupa.period.end.to_string(),
                selection: l.pupa.selection_date.to_string(),
            },
            queen_phase: QueenPhaseDto {
                emergence_start: l.adult.emergence.start.to_string(),
                emergence_end: l.adult.emergence.end.to_string(),
                maturation_start: l.adult.maturation.start.to_string(),
                maturation_end: l.adult.maturation.end.to_string(),
                mating_flight_start: l.adult.mating_flight.start.to_string(),
                mating_flight_end: l.adult.mating_flight.end.to_string(),
                insemination_start: l.adult.insemination.start.to_string(),
                insemination_end: l.adult.insemination.end.to_string(),
                egg_laying_check_start: l.adult.check_laying.start.to_string(),
                egg_laying_check_end: l.adult.check_laying.end.to_string(),
            },
        }
    }
}

/// Decode a service response into a validated lifecycle.
///
/// A failed status, or a success without `data`, becomes
/// [`CalendarError::Service`] carrying the service's message.
pub fn decode_response(json: &str) -> Result<QueenLifecycle> {
    let response: QueenCalendarResponse = serde_json::from_str(json)?;

    let succeeded = response.status.eq_ignore_ascii_case(STATUS_SUCCESS)
        || response.status.eq_ignore_ascii_case("ok");
    match response.data {
        Some(ref data) if succeeded => QueenLifecycle::try_from(data),
        _ => {
            let reason = if response.message.trim().is_empty() {
                format!("status '{}' without calendar data", response.status)
            } else {
                response.message
            };
            Err(CalendarError::Service(reason))
        }
    }
}

/// Wrap a lifecycle in a successful response envelope.
#[must_use]
pub fn encode_response(lifecycle: &QueenLifecycle) -> QueenCalendarResponse {
    QueenCalendarResponse {
        status: STATUS_SUCCESS.to_string(),
        message: "calendar calculated".to_string(),
        data: Some(QueenCalendarDto::from(lifecycle)),
    }
}
