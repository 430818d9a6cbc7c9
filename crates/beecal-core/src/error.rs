//! # Error Module
//!
//! Errors raised while building a [`QueenLifecycle`](crate::QueenLifecycle).
//!
//! Projection itself is total over a well-formed lifecycle and never fails;
//! everything that can go wrong happens at construction time.

use thiserror::Error;

/// Errors from lifecycle construction and decoding.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// A date string was not a real `YYYY-MM-DD` calendar date.
    #[error("invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },

    /// A lifecycle broke one of its ordering invariants.
    #[error("malformed lifecycle: {invariant}")]
    Malformed { invariant: String },

    /// Offsetting the birth date left chrono's representable range.
    #[error("birth date {birth_date} is too close to the end of the calendar")]
    OutOfRange { birth_date: chrono::NaiveDate },

    /// JSON decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The calculation service reported a failure.
    #[error("calculation service error: {0}")]
    Service(String),
}

impl CalendarError {
    pub(crate) fn malformed(invariant: impl Into<String>) -> Self {
        Self::Malformed {
            invariant: invariant.into(),
        }
    }
}

/// Result alias for calendar operations.
pub type Result<T> = std::result::Result<T, CalendarError>;
