//! `slotkit` CLI: inspect freelancer availability payloads from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Bookable slots for a date (payload from file or stdin)
//! slotkit slots -i availability.json --date 2024-06-10
//!
//! # Same, as JSON, pinned to a fixed "now" in a given zone
//! slotkit --timezone Asia/Kolkata slots -i availability.json --date 2024-06-10 \
//!     --now 2024-06-10T08:00 --json
//!
//! # Open dates for the next two weeks
//! slotkit open-dates -i availability.json --from 2024-06-10 --days 14
//!
//! # Replay calendar clicks and print the resulting edit
//! slotkit select --mode pause --paused 2024-06-20 --click 2024-06-12 --click 2024-06-14
//! ```
//!
//! `SLOTKIT_TIMEZONE` sets the default zone; `RUST_LOG` takes `tracing` filter directives
//! (default `warn`) for stderr logging.

mod config;

use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand, ValueEnum};
use slot_engine::model::{parse_date, parse_timezone, parse_wall_clock};
use slot_engine::pause::PauseSelection;
use slot_engine::range::RangeSelection;
use slot_engine::{Availability, AvailabilityPayload, DateRangeSelector};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "slotkit",
    version,
    about = "Booking slot and availability calendar CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// IANA timezone of the freelancer (overrides SLOTKIT_TIMEZONE)
    #[arg(long, global = true)]
    timezone: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List bookable one-hour slots for a date
    Slots {
        /// Availability payload JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Current wall-clock time (defaults to the system clock)
        #[arg(long)]
        now: Option<String>,
        /// Print a JSON array instead of one label per line
        #[arg(long)]
        json: bool,
    },
    /// List dates open for booking
    OpenDates {
        /// Availability payload JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// First date to check (defaults to today)
        #[arg(long)]
        from: Option<String>,
        /// Number of days to check
        #[arg(long, default_value_t = 14)]
        days: u32,
        /// Today's date (defaults to the system clock)
        #[arg(long)]
        today: Option<String>,
    },
    /// Replay calendar clicks and print the applied edit
    Select {
        #[arg(long, value_enum)]
        mode: Mode,
        /// Range start the calendar opens with
        #[arg(long)]
        start: Option<String>,
        /// Range end the calendar opens with
        #[arg(long)]
        end: Option<String>,
        /// Keep the start fixed; clicks only move the end
        #[arg(long, requires = "start")]
        fixed_start: bool,
        /// Comma-separated dates already paused
        #[arg(long)]
        paused: Option<String>,
        /// Availability window start for pause mode
        #[arg(long, requires = "window_end")]
        window_start: Option<String>,
        /// Availability window end for pause mode
        #[arg(long, requires = "window_start")]
        window_end: Option<String>,
        /// Today's date (defaults to the system clock)
        #[arg(long)]
        today: Option<String>,
        /// Clicked date, in order (repeatable)
        #[arg(long = "click")]
        clicks: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Range,
    Pause,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let tz = match cli.timezone.as_deref() {
        Some(name) => parse_timezone(name)?,
        None => config.timezone,
    };
    debug!(timezone = %tz, "resolved timezone");

    match cli.command {
        Commands::Slots {
            input,
            date,
            now,
            json,
        } => {
            let availability = load_availability(input.as_deref(), tz)?;
            let date = parse_date(&date)?;
            let now = match now {
                Some(now) => parse_wall_clock(&now, tz)?,
                None => wall_clock_now(tz),
            };

            let slots = availability
                .slots_for(date, now)
                .with_context(|| format!("Failed to generate slots for {}", date))?;
            info!(%date, count = slots.len(), "computed slots");

            if json {
                println!("{}", serde_json::to_string_pretty(&slots)?);
            } else {
                for slot in &slots {
                    println!("{}", slot);
                }
            }
        }
        Commands::OpenDates {
            input,
            from,
            days,
            today,
        } => {
            let availability = load_availability(input.as_deref(), tz)?;
            let today = today_or(today.as_deref(), tz)?;
            let from = match from {
                Some(from) => parse_date(&from)?,
                None => today,
            };
            for date in slot_engine::open_dates(&availability, from, days, today) {
                println!("{}", date);
            }
        }
        Commands::Select {
            mode,
            start,
            end,
            fixed_start,
            paused,
            window_start,
            window_end,
            today,
            clicks,
        } => {
            let today = today_or(today.as_deref(), tz)?;
            let mut selector = match mode {
                Mode::Range => {
                    let start = start.as_deref().map(parse_date).transpose()?;
                    let end = end.as_deref().map(parse_date).transpose()?;
                    let range = match (fixed_start, start) {
                        (true, Some(start)) => RangeSelection::with_fixed_start(start, end),
                        _ => RangeSelection::new(start, end),
                    };
                    DateRangeSelector::select(range, today)
                }
                Mode::Pause => {
                    let paused = parse_date_list(paused.as_deref())?;
                    let window = match (window_start, window_end) {
                        (Some(start), Some(end)) => Some((parse_date(&start)?, parse_date(&end)?)),
                        _ => None,
                    };
                    DateRangeSelector::pause(PauseSelection::new(paused, window), today)
                }
            };

            selector.open();
            for click in &clicks {
                let date = parse_date(click)?;
                if !selector.click(date) {
                    debug!(%date, "click had no effect");
                }
            }

            match selector.apply() {
                Some(edit) => println!("{}", serde_json::to_string(&edit)?),
                None => anyhow::bail!("Apply is disabled: the selection is incomplete"),
            }
        }
    }

    Ok(())
}

fn wall_clock_now(tz: Tz) -> NaiveDateTime {
    Utc::now().with_timezone(&tz).naive_local()
}

fn today_or(explicit: Option<&str>, tz: Tz) -> Result<NaiveDate> {
    match explicit {
        Some(s) => Ok(parse_date(s)?),
        None => Ok(wall_clock_now(tz).date()),
    }
}

/// Split a comma-separated list of dates; an empty string yields no dates.
fn parse_date_list(raw: Option<&str>) -> Result<Vec<NaiveDate>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| parse_date(part).map_err(anyhow::Error::from))
        .collect()
}

fn load_availability(path: Option<&str>, tz: Tz) -> Result<Availability> {
    let json = read_input(path)?;
    let payload =
        AvailabilityPayload::from_json(&json).context("Failed to parse availability payload")?;
    payload
        .resolve(tz)
        .context("Failed to resolve availability payload")
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
