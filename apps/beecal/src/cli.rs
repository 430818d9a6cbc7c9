//! # CLI Module
//!
//! Command definitions and the `cmd_*` handlers behind them.
//!
//! Handlers write to any [`Write`] so integration tests can capture output.

use crate::config::{self, Config};
use crate::error::AppError;
use crate::source::{SourceKind, SystemClock, build_source};
use beecal_core::formats::{decode_response, encode_response};
use beecal_core::{
    Clock, LifecycleSource, Locale, MilestoneKind, NaiveDate, Projector, QueenLifecycle,
    StageProgress, TimelineEntry, parse_date,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

// =============================================================================
// ARGUMENTS
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "beecal", version, about = "Queen bee lifecycle calendar")]
pub struct Cli {
    /// Config file (defaults to ./beecal.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Label language: en or ru
    #[arg(long, global = true)]
    pub locale: Option<Locale>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the dated stages for a birth date
    Calendar {
        #[arg(long, value_parser = parse_date_arg)]
        birth_date: NaiveDate,
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, value_enum, default_value_t = CalendarFormat::Text)]
        format: CalendarFormat,
    },
    /// Show the active stage on a given day
    Progress {
        #[arg(long, value_parser = parse_date_arg)]
        birth_date: NaiveDate,
        /// Reference day (defaults to the system date)
        #[arg(long, value_parser = parse_date_arg)]
        today: Option<NaiveDate>,
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long)]
        json: bool,
    },
    /// List every milestone relative to a given day
    Timeline {
        #[arg(long, value_parser = parse_date_arg)]
        birth_date: NaiveDate,
        #[arg(long, value_parser = parse_date_arg)]
        today: Option<NaiveDate>,
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long)]
        json: bool,
    },
    /// Decode a saved calculation-service response
    ///
    /// Payloads are validated like any other lifecycle: a response whose
    /// selection date falls after the end of the pupa period is rejected.
    Import {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, value_parser = parse_date_arg)]
        today: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Lifecycle source (overrides config)
    #[arg(long, value_enum)]
    pub source: Option<SourceKind>,

    /// Fixture file for `--source fixture`
    #[arg(long)]
    pub fixture: Option<PathBuf>,
}

impl SourceArgs {
    fn apply_to(&self, config: &mut Config) {
        if let Some(source) = self.source {
            config.source = source;
        }
        if let Some(ref path) = self.fixture {
            config.fixture_path = Some(path.clone());
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CalendarFormat {
    /// Human-readable stage table
    #[default]
    Text,
    /// The lifecycle record as JSON
    Json,
    /// The calculation-service response envelope
    Wire,
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).map_err(|e| e.to_string())
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Resolve configuration and run the parsed command.
///
/// `env` looks up `BEECAL_*` overrides; the binary passes the process
/// environment.
pub fn run(
    cli: Cli,
    out: &mut impl Write,
    env: impl Fn(&str) -> Option<String>,
) -> Result<(), AppError> {
    let mut config = config::load(cli.config.as_deref())?;
    config::apply_env_overrides(&mut config, env);
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    tracing::debug!(?config, "resolved config");

    let projector = Projector::new(config.locale);
    let clock = SystemClock;

    match cli.command {
        Command::Calendar {
            birth_date,
            source,
            format,
        } => {
            source.apply_to(&mut config);
            let source = build_source(&config)?;
            cmd_calendar(out, source.as_ref(), birth_date, format)
        }
        Command::Progress {
            birth_date,
            today,
            source,
            json,
        } => {
            source.apply_to(&mut config);
            let source = build_source(&config)?;
            let today = today.unwrap_or_else(|| clock.today());
            cmd_progress(out, source.as_ref(), projector, birth_date, today, json)
        }
        Command::Timeline {
            birth_date,
            today,
            source,
            json,
        } => {
            source.apply_to(&mut config);
            let source = build_source(&config)?;
            let today = today.unwrap_or_else(|| clock.today());
            cmd_timeline(out, source.as_ref(), projector, birth_date, today, json)
        }
        Command::Import { file, today, json } => {
            let today = today.unwrap_or_else(|| clock.today());
            cmd_import(out, &file, projector, today, json)
        }
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

pub fn cmd_calendar(
    out: &mut impl Write,
    source: &dyn LifecycleSource,
    birth_date: NaiveDate,
    format: CalendarFormat,
) -> Result<(), AppError> {
    tracing::info!(%birth_date, ?format, "calendar");
    let lifecycle = source.derive(birth_date)?;

    match format {
        CalendarFormat::Text => out.write_all(render_calendar(&lifecycle).as_bytes())?,
        CalendarFormat::Json => write_json(out, &lifecycle)?,
        CalendarFormat::Wire => write_json(out, &encode_response(&lifecycle))?,
    }
    Ok(())
}

pub fn cmd_progress(
    out: &mut impl Write,
    source: &dyn LifecycleSource,
    projector: Projector,
    birth_date: NaiveDate,
    today: NaiveDate,
    json: bool,
) -> Result<(), AppError> {
    tracing::info!(%birth_date, %today, "progress");
    let lifecycle = source.derive(birth_date)?;
    let view = projector.project(&lifecycle, today);

    if json {
        write_json(out, &view)?;
    } else {
        out.write_all(render_progress(&view).as_bytes())?;
    }
    Ok(())
}

pub fn cmd_timeline(
    out: &mut impl Write,
    source: &dyn LifecycleSource,
    projector: Projector,
    birth_date: NaiveDate,
    today: NaiveDate,
    json: bool,
) -> Result<(), AppError> {
    tracing::info!(%birth_date, %today, "timeline");
    let lifecycle = source.derive(birth_date)?;
    let entries = projector.timeline(&lifecycle, today);

    if json {
        write_json(out, &entries)?;
    } else {
        out.write_all(render_timeline(&entries).as_bytes())?;
    }
    Ok(())
}

/// Everything `import` derives from one service response.
#[derive(Debug, Serialize)]
struct ImportReport<'a> {
    lifecycle: &'a QueenLifecycle,
    progress: StageProgress,
    timeline: Vec<TimelineEntry>,
}

pub fn cmd_import(
    out: &mut impl Write,
    path: &Path,
    projector: Projector,
    today: NaiveDate,
    json: bool,
) -> Result<(), AppError> {
    tracing::info!(path = %path.display(), %today, "import");
    let body = std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    let lifecycle = decode_response(&body)?;

    let report = ImportReport {
        lifecycle: &lifecycle,
        progress: projector.project(&lifecycle, today),
        timeline: projector.timeline(&lifecycle, today),
    };

    if json {
        write_json(out, &report)?;
    } else {
        out.write_all(render_calendar(&lifecycle).as_bytes())?;
        out.write_all(b"\n")?;
        out.write_all(render_progress(&report.progress).as_bytes())?;
        out.write_all(b"\n")?;
        out.write_all(render_timeline(&report.timeline).as_bytes())?;
    }
    Ok(())
}

// =============================================================================
// RENDERING
// =============================================================================

fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    out.write_all(b"\n")?;
    Ok(())
}

pub fn render_calendar(lifecycle: &QueenLifecycle) -> String {
    let egg = &lifecycle.egg;
    let larva = &lifecycle.larva;
    let pupa = &lifecycle.pupa;
    let adult = &lifecycle.adult;

    let mut output = format!("Queen born {}\n", lifecycle.birth_date);
    output.push_str(&format!(
        "  {:<14} {} .. {}\n",
        "egg", egg.day0_standing, egg.day2_lying
    ));
    output.push_str(&format!(
        "  {:<14} {} .. {}  (feeding {} .. {})\n",
        "larva",
        larva.hatch_date,
        larva.sealed_date,
        larva.feeding_days[0],
        larva.feeding_days[larva.feeding_days.len() - 1]
    ));
    output.push_str(&format!(
        "  {:<14} {} .. {}  (selection {})\n",
        "pupa", pupa.period.start, pupa.period.end, pupa.selection_date
    ));
    for (name, range) in adult.windows() {
        output.push_str(&format!("  {:<14} {} .. {}\n", name, range.start, range.end));
    }
    output
}

pub fn render_progress(view: &StageProgress) -> String {
    let mut output = format!("{} | {}\n", view.title, view.description);
    output.push_str(&format!("progress: {:.2}\n", view.progress));
    output.push_str(&view.remaining_days_text);
    output.push('\n');
    if view.is_action_required {
        output.push_str("ACTION REQUIRED today\n");
    }
    output
}

pub fn render_timeline(entries: &[TimelineEntry]) -> String {
    let mut output = String::new();
    for entry in entries {
        let marker = if entry.is_today {
            '>'
        } else if entry.is_completed {
            'x'
        } else {
            ' '
        };
        let attention = if entry.stage_type == MilestoneKind::Attention {
            "!"
        } else {
            " "
        };
        output.push_str(&format!(
            "{marker}{attention} {} {:<14} {} - {}\n",
            entry.date, entry.formatted_date, entry.title, entry.description
        ));
    }
    output
}
