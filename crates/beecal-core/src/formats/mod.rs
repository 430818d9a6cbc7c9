//! # Formats Module
//!
//! JSON shapes a lifecycle arrives in or leaves as.
//!
//! This module contains:
//! - Fixture format (camelCase, mirrors the lifecycle records)
//! - Calculation-service format (snake_case phases inside a status envelope)
//!
//! Note: File I/O stays in the app layer (apps/beecal).
//! This module only handles format conversion (pure transformations).
//! Every decoded lifecycle is validated before it is returned.

mod fixture;
mod wire;

pub use fixture::{
    FixtureAdult, FixtureDateRange, FixtureEgg, FixtureLarva, FixturePupa, LifecycleFixture,
    decode_fixture, encode_fixture,
};
pub use wire::{
    CalcQueenRequest, EggPhaseDto, LarvaPhaseDto, PupaPhaseDto, QueenCalendarDto,
    QueenCalendarResponse, QueenPhaseDto, decode_response, encode_response,
};

use crate::calendar::parse_date;
use crate::error::Result;
use crate::lifecycle::DateRange;

fn parse_range(start: &str, end: &str) -> Result<DateRange> {
    Ok(DateRange::new(parse_date(start)?, parse_date(end)?))
}
