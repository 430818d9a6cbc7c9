//! Layered configuration.
//!
//! Precedence, lowest first: built-in defaults, the TOML file
//! (`--config PATH`, else `./beecal.toml` when present), `BEECAL_*`
//! environment variables, then command-line flags.
//!
//! ```toml
//! locale = "ru"
//! source = "fixture"
//! fixture_path = "fixtures/queen.json"
//! ```

use crate::error::AppError;
use crate::source::SourceKind;
use beecal_core::Locale;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "beecal.toml";

pub const ENV_LOCALE: &str = "BEECAL_LOCALE";
pub const ENV_SOURCE: &str = "BEECAL_SOURCE";
pub const ENV_FIXTURE: &str = "BEECAL_FIXTURE";

/// Resolved configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub locale: Locale,
    pub source: SourceKind,
    pub fixture_path: Option<PathBuf>,
}

/// One partial layer, as read from a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    pub locale: Option<Locale>,
    pub source: Option<SourceKind>,
    pub fixture_path: Option<PathBuf>,
}

impl ConfigLayer {
    pub fn apply_to(self, config: &mut Config) {
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
        if let Some(source) = self.source {
            config.source = source;
        }
        if let Some(path) = self.fixture_path {
            config.fixture_path = Some(path);
        }
    }
}

pub fn load_layer(path: &Path) -> Result<ConfigLayer, AppError> {
    let contents = fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    toml::from_str(&contents)
        .map_err(|e| AppError::Config(format!("failed to parse {}: {e}", path.display())))
}

/// Load defaults plus the config file.
///
/// An explicit path must exist; the implicit `./beecal.toml` is optional.
pub fn load(explicit: Option<&Path>) -> Result<Config, AppError> {
    let mut config = Config::default();

    let layer = match explicit {
        Some(path) => Some(load_layer(path)?),
        None => {
            let implicit = Path::new(CONFIG_FILE_NAME);
            if implicit.exists() {
                Some(load_layer(implicit)?)
            } else {
                None
            }
        }
    };

    if let Some(layer) = layer {
        tracing::debug!(?layer, "applying config file");
        layer.apply_to(&mut config);
    }
    Ok(config)
}

/// Apply `BEECAL_*` overrides read through `lookup`.
///
/// Invalid values are logged and ignored.
pub fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(raw) = lookup(ENV_LOCALE) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            match trimmed.parse::<Locale>() {
                Ok(locale) => config.locale = locale,
                Err(err) => tracing::warn!("invalid {ENV_LOCALE}, ignoring: {err}"),
            }
        }
    }

    if let Some(raw) = lookup(ENV_SOURCE) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            match trimmed.parse::<SourceKind>() {
                Ok(source) => config.source = source,
                Err(err) => tracing::warn!("invalid {ENV_SOURCE}, ignoring: {err}"),
            }
        }
    }

    if let Some(raw) = lookup(ENV_FIXTURE) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            config.fixture_path = Some(PathBuf::from(trimmed));
        }
    }
}
