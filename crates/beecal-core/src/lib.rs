//! # beecal-core
//!
//! Queen lifecycle calendar engine.
//!
//! Turns a queen's birth date into dated biological stages and projects that
//! calendar onto a reference day:
//!
//! ```text
//! birth date ──► LifecycleSource ──► QueenLifecycle ──┬──► project()  ──► StageProgress
//!                (OffsetCalendar,                     │
//!                 fixtures, service payloads)         └──► timeline() ──► Vec<TimelineEntry>
//! ```
//!
//! Everything here is pure and synchronous. "Today" is always an explicit
//! argument (or comes from a caller-supplied [`Clock`]), so every result is
//! reproducible.

pub mod calendar;
pub mod clock;
pub mod error;
pub mod formats;
pub mod labels;
pub mod lifecycle;
pub mod progress;
pub mod timeline;

pub use calendar::{LifecycleSource, OffsetCalendar, derive_lifecycle, parse_date};
pub use clock::{Clock, FixedClock};
pub use error::{CalendarError, Result};
pub use labels::Locale;
pub use lifecycle::{AdultStage, DateRange, EggStage, LarvaStage, PupaStage, QueenLifecycle};
pub use progress::{Projector, Stage, StageProgress, days_between, project};
pub use timeline::{Milestone, MilestoneKind, TIMELINE_LEN, TimelineEntry, milestones, timeline};

pub use chrono::NaiveDate;
