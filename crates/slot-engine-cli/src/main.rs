//! `slots` CLI — propose, check, and explain calendar slots from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Find slots for a JSON request (stdin → stdout)
//! cat request.json | slots find
//!
//! # Same, with stored preferences from a TOML file
//! slots --preferences prefs.toml find -i request.json -o slots.json
//!
//! # Check one proposed interval against preferences and a busy list
//! slots check --start 2026-03-16T10:00:00Z --end 2026-03-16T11:00:00Z --busy busy.json
//!
//! # List free windows in a range
//! slots free --start 2026-03-16T08:00:00Z --end 2026-03-16T18:00:00Z -i busy.json
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=slot_engine=debug` or pass `--verbose`.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use slot_engine::conflict::Conflict;
use slot_engine::generator::exclusion_set;
use slot_engine::request::{parse_busy, parse_instant, BusyInput};
use slot_engine::time_of_day::parse_timezone;
use slot_engine::{Interval, PreferenceSettings, Rejection, Tz};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Propose calendar slots from busy intervals and scheduling preferences"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Preferences TOML file (defaults are used if omitted)
    #[arg(short, long, global = true)]
    preferences: Option<PathBuf>,

    /// Log engine decisions to stderr at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find available slots for a JSON slot request
    Find {
        /// Request JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Check whether one interval fits the preferences and the buffered busy list
    Check {
        /// Start of the proposed interval (RFC 3339)
        #[arg(long)]
        start: String,
        /// End of the proposed interval (RFC 3339)
        #[arg(long)]
        end: String,
        /// File holding a JSON array of busy intervals
        #[arg(long)]
        busy: Option<String>,
        /// IANA timezone for clock-time rules (defaults to the preferences' timezone)
        #[arg(long)]
        timezone: Option<String>,
    },
    /// List free windows between busy intervals
    Free {
        /// Start of the range (RFC 3339)
        #[arg(long)]
        start: String,
        /// End of the range (RFC 3339)
        #[arg(long)]
        end: String,
        /// JSON array of busy intervals (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Only report windows at least this many minutes long
        #[arg(long)]
        min_minutes: Option<i64>,
    },
}

#[derive(Serialize)]
struct CheckReport {
    compatible: bool,
    reason: Option<Rejection>,
    conflicts: Vec<Conflict>,
    /// Set when the interval clears every busy interval but not its buffers.
    within_buffer: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            // Re-parse with --help to show usage (clap handles this)
            Cli::parse_from(["slots", "--help"]);
            unreachable!();
        }
    };

    let settings = load_settings(cli.preferences.as_ref())?;

    match command {
        Commands::Find { input, output } => {
            let json = read_input(input.as_deref())?;
            let response = slot_engine::handle_request_json(&json, &settings)
                .context("Failed to find slots")?;
            let value: serde_json::Value = serde_json::from_str(&response)?;
            write_output(output.as_deref(), &serde_json::to_string_pretty(&value)?)?;
        }
        Commands::Check {
            start,
            end,
            busy,
            timezone,
        } => {
            let profile = settings.validate().context("Invalid preferences")?;
            let tz = match timezone.as_deref() {
                Some(name) => parse_timezone(name)?,
                None => profile.timezone(),
            };
            let proposed = Interval {
                start: parse_instant(&start)?,
                end: parse_instant(&end)?,
            };
            let busy = match busy.as_deref() {
                Some(path) => read_busy(&read_input(Some(path))?, tz)?,
                None => Vec::new(),
            };

            let reason = slot_engine::check_compatibility(&proposed, &profile, tz)
                .context("Failed to check proposed interval")?;
            let conflicts = slot_engine::find_conflicts(&proposed, &busy)?;
            let blocked = exclusion_set(&busy, &profile)
                .iter()
                .any(|exclusion| exclusion.overlaps(&proposed));
            let report = CheckReport {
                compatible: reason.is_none() && !blocked,
                reason,
                within_buffer: blocked && conflicts.is_empty(),
                conflicts,
            };
            info!(compatible = report.compatible, "checked proposed interval");
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Free {
            start,
            end,
            input,
            min_minutes,
        } => {
            let tz = parse_timezone(&settings.timezone)?;
            let range = Interval {
                start: parse_instant(&start)?,
                end: parse_instant(&end)?,
            };
            let busy = read_busy(&read_input(input.as_deref())?, tz)?;
            let mut windows = slot_engine::find_free_windows(&busy, &range)
                .context("Failed to compute free windows")?;
            if let Some(min) = min_minutes {
                windows.retain(|w| w.duration_minutes >= min);
            }
            println!("{}", serde_json::to_string_pretty(&windows)?);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "slot_engine=debug,slots=debug"
    } else {
        "slot_engine=warn,slots=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_settings(path: Option<&PathBuf>) -> Result<PreferenceSettings> {
    match path {
        Some(path) => PreferenceSettings::from_file(path)
            .with_context(|| format!("Failed to load preferences: {}", path.display())),
        None => Ok(PreferenceSettings::default()),
    }
}

fn read_busy(json: &str, tz: Tz) -> Result<Vec<Interval>> {
    let inputs: Vec<BusyInput> =
        serde_json::from_str(json).context("Busy list must be a JSON array of {start, end}")?;
    inputs
        .iter()
        .map(|b| parse_busy(b, tz).map_err(anyhow::Error::from))
        .collect()
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
