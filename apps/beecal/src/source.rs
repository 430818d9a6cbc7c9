//! Lifecycle sources and the wall clock.
//!
//! Core ships the offset calendar; this module adds the fixture-file
//! source and picks one of them from the resolved config.

use crate::config::Config;
use crate::error::AppError;
use beecal_core::formats::decode_fixture;
use beecal_core::{Clock, LifecycleSource, NaiveDate, OffsetCalendar, QueenLifecycle};
use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Which [`LifecycleSource`] answers calendar requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Fixed day offsets from the birth date.
    #[default]
    Offsets,
    /// A lifecycle stored in a JSON fixture file.
    Fixture,
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offsets" => Ok(Self::Offsets),
            "fixture" => Ok(Self::Fixture),
            other => Err(format!(
                "unknown source '{other}' (expected offsets or fixture)"
            )),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offsets => f.write_str("offsets"),
            Self::Fixture => f.write_str("fixture"),
        }
    }
}

// =============================================================================
// FIXTURE SOURCE
// =============================================================================

/// Serves one lifecycle read from a fixture file.
///
/// The file is read and validated once, when the source is opened; every
/// later request gets the same immutable lifecycle whatever birth date it
/// asks for.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    path: PathBuf,
    lifecycle: QueenLifecycle,
}

impl FixtureSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
        let lifecycle = decode_fixture(&json)?;
        tracing::info!(path = %path.display(), birth_date = %lifecycle.birth_date, "loaded fixture");
        Ok(Self {
            path: path.to_path_buf(),
            lifecycle,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lifecycle(&self) -> &QueenLifecycle {
        &self.lifecycle
    }
}

impl LifecycleSource for FixtureSource {
    fn derive(&self, birth_date: NaiveDate) -> beecal_core::Result<QueenLifecycle> {
        if birth_date != self.lifecycle.birth_date {
            tracing::warn!(
                requested = %birth_date,
                fixture = %self.lifecycle.birth_date,
                "fixture serves a fixed birth date"
            );
        }
        Ok(self.lifecycle)
    }
}

/// Build the source selected by `config`.
pub fn build_source(config: &Config) -> Result<Box<dyn LifecycleSource>, AppError> {
    tracing::debug!(source = %config.source, "selecting lifecycle source");
    match config.source {
        SourceKind::Offsets => Ok(Box::new(OffsetCalendar::new())),
        SourceKind::Fixture => {
            let path = config.fixture_path.as_ref().ok_or_else(|| {
                AppError::Usage(
                    "source 'fixture' needs --fixture, BEECAL_FIXTURE or fixture_path".to_string(),
                )
            })?;
            Ok(Box::new(FixtureSource::open(path)?))
        }
    }
}

// =============================================================================
// CLOCK
// =============================================================================

/// Today's date in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use beecal_core::derive_lifecycle;
    use beecal_core::formats::encode_fixture;

    fn born() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 10).unwrap()
    }

    #[test]
    fn source_kind_parses() {
        assert_eq!("Fixture".parse::<SourceKind>(), Ok(SourceKind::Fixture));
        assert!("remote".parse::<SourceKind>().is_err());
    }

    #[test]
    fn fixture_source_serves_file_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queen.json");
        let lifecycle = derive_lifecycle(born()).unwrap();
        std::fs::write(&path, encode_fixture(&lifecycle).unwrap()).unwrap();

        let source = FixtureSource::open(&path).unwrap();
        assert_eq!(source.path(), path.as_path());
        assert_eq!(source.derive(born()).unwrap(), lifecycle);
        // a different birth date still gets the fixture
        let other = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(source.derive(other).unwrap(), lifecycle);
    }

    #[test]
    fn missing_fixture_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FixtureSource::open(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }

    #[test]
    fn fixture_source_without_path_is_usage_error() {
        let config = Config {
            source: SourceKind::Fixture,
            ..Config::default()
        };
        assert!(matches!(build_source(&config), Err(AppError::Usage(_))));
    }

    #[test]
    fn default_config_uses_offsets() {
        let source = build_source(&Config::default()).unwrap();
        assert_eq!(
            source.derive(born()).unwrap(),
            derive_lifecycle(born()).unwrap()
        );
    }
}
