//! `schedule` CLI: shape clinic schedule JSON into calendar-ready JSON.
//!
//! ## Usage
//!
//! ```sh
//! # Working-hours table → business-hours blocks (stdin → stdout)
//! cat hours.json | schedule business-hours
//!
//! # Booking end time
//! schedule booking-end --date 2024-03-01 --start 09:00 --duration 30
//!
//! # Inactivity display end (one record or an array)
//! schedule inactivity-end -i holiday.json --range strict
//!
//! # Full calendar view from a snapshot {hours, bookings, inactivity}
//! schedule calendar -i snapshot.json -o view.json --config schedule.toml
//!
//! # Patient autocomplete
//! schedule patients --query mar -i patients.json
//!
//! # Seed national holidays from the lookup payload
//! schedule holidays --pro-id 42 -i lookup.json --existing inactivity.json
//!
//! # Concrete business-hours instances for a date window
//! schedule expand -i hours.json --from 2024-03-04 --to 2024-03-31 --timezone Europe/Madrid
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` or pass `-v` / `-vv` for more detail.

mod config;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use schedule_engine::time::{parse_date, DurationMinutes, TimeOfDay};
use schedule_engine::{
    build_calendar, expand_business_hours, filter_patients, inactivity, reduce_business_hours,
    resolve_end_with_rollover, seed_national_holidays, EngineOptions, HolidayLookup,
    InactivityRecord, Patient, RangePolicy, RolloverPolicy, ScheduleSnapshot, WorkingHourRecord,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "schedule",
    version,
    about = "Shape clinic schedule data into calendar-ready JSON"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Reduce a working-hours table to business-hours blocks
    BusinessHours {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Compute a booking's end time from its date, start and duration
    BookingEnd {
        /// Booking date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Start time (HH:MM or HH:MM:SS)
        #[arg(long)]
        start: String,
        /// Duration in minutes
        #[arg(long, allow_hyphen_values = true)]
        duration: String,
        /// Print the full end timestamp, including any date rollover
        #[arg(long)]
        with_date: bool,
    },
    /// Resolve the display end of one inactivity record or an array of them
    InactivityEnd {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// How to treat records with both ending_date and ending_hour
        #[arg(long, value_enum)]
        range: Option<RangeArg>,
        /// Fail records that end before they start
        #[arg(long)]
        reject_inverted: bool,
    },
    /// Build the calendar view from a schedule snapshot
    Calendar {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// How to treat inactivity with both ending_date and ending_hour
        #[arg(long, value_enum)]
        range: Option<RangeArg>,
        /// How to end bookings that run past midnight
        #[arg(long, value_enum)]
        rollover: Option<RolloverArg>,
        /// Fail inactivity records that end before they start
        #[arg(long)]
        reject_inverted: bool,
    },
    /// Search patients by name, last name, email or phone
    Patients {
        /// Search text
        #[arg(short, long)]
        query: String,
        /// Patient list file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Turn a national-holiday lookup into inactivity records
    Holidays {
        /// Professional the holidays belong to
        #[arg(long)]
        pro_id: i64,
        /// Lookup payload file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// The professional's current inactivity records
        #[arg(long)]
        existing: Option<String>,
    },
    /// Expand business hours into concrete instances between two dates
    Expand {
        /// Working-hours table file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// First date of the window (YYYY-MM-DD)
        #[arg(long)]
        from: String,
        /// Last date of the window (YYYY-MM-DD)
        #[arg(long)]
        to: String,
        /// IANA timezone (overrides the config file)
        #[arg(long)]
        timezone: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RangeArg {
    FillGap,
    Strict,
    Legacy,
}

impl From<RangeArg> for RangePolicy {
    fn from(arg: RangeArg) -> Self {
        match arg {
            RangeArg::FillGap => RangePolicy::FillGap,
            RangeArg::Strict => RangePolicy::Strict,
            RangeArg::Legacy => RangePolicy::Legacy,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RolloverArg {
    CarryDate,
    Discard,
}

impl From<RolloverArg> for RolloverPolicy {
    fn from(arg: RolloverArg) -> Self {
        match arg {
            RolloverArg::CarryDate => RolloverPolicy::CarryDate,
            RolloverArg::Discard => RolloverPolicy::Discard,
        }
    }
}

/// One resolved inactivity span, as printed by `inactivity-end`.
#[derive(Serialize)]
struct InactivitySpan {
    start: String,
    end: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let mut config = Config::load(cli.config.as_deref())?;
    debug!(?config, "loaded configuration");

    match cli.command {
        Commands::BusinessHours { input, output } => {
            let records: Vec<WorkingHourRecord> = read_json(input.as_deref(), "working-hours")?;
            let blocks = reduce_business_hours(&records);
            info!(blocks = blocks.len(), "reduced business hours");
            write_output(output.as_deref(), &to_pretty(&blocks)?)?;
        }
        Commands::BookingEnd {
            date,
            start,
            duration,
            with_date,
        } => {
            let date = parse_date(&date)?;
            let start = TimeOfDay::parse(&start)?;
            let duration: DurationMinutes = duration.parse()?;
            let resolved = resolve_end_with_rollover(date, start, duration)?;
            if with_date {
                println!("{}T{}", resolved.ending_date, resolved.ending_time);
            } else {
                println!("{}", resolved.ending_time);
            }
        }
        Commands::InactivityEnd {
            input,
            range,
            reject_inverted,
        } => {
            if let Some(range) = range {
                config.options.inactivity_range = range.into();
            }
            config.options.reject_inverted |= reject_inverted;
            let value: serde_json::Value = read_json(input.as_deref(), "inactivity")?;
            let output = if value.is_array() {
                let records: Vec<InactivityRecord> = serde_json::from_value(value)
                    .context("Failed to parse inactivity records")?;
                let spans = records
                    .iter()
                    .map(|r| inactivity_span(r, &config.options))
                    .collect::<Result<Vec<_>>>()?;
                to_pretty(&spans)?
            } else {
                let record: InactivityRecord = serde_json::from_value(value)
                    .context("Failed to parse inactivity record")?;
                to_pretty(&inactivity_span(&record, &config.options)?)?
            };
            write_output(None, &output)?;
        }
        Commands::Calendar {
            input,
            output,
            range,
            rollover,
            reject_inverted,
        } => {
            if let Some(range) = range {
                config.options.inactivity_range = range.into();
            }
            if let Some(rollover) = rollover {
                config.options.booking_rollover = rollover.into();
            }
            config.options.reject_inverted |= reject_inverted;
            let snapshot: ScheduleSnapshot = read_json(input.as_deref(), "schedule snapshot")?;
            let view = build_calendar(&snapshot, &config.options)
                .context("Failed to build calendar view")?;
            info!(events = view.events.len(), "built calendar view");
            write_output(output.as_deref(), &to_pretty(&view)?)?;
        }
        Commands::Patients { query, input } => {
            let patients: Vec<Patient> = read_json(input.as_deref(), "patients")?;
            let found = filter_patients(&patients, &query);
            write_output(None, &to_pretty(&found)?)?;
        }
        Commands::Holidays {
            pro_id,
            input,
            existing,
        } => {
            let lookup: HolidayLookup = read_json(input.as_deref(), "holiday lookup")?;
            let existing: Vec<InactivityRecord> = match existing {
                Some(path) => read_json(Some(path.as_str()), "existing inactivity")?,
                None => Vec::new(),
            };
            let seeded = seed_national_holidays(&existing, &lookup, pro_id)?;
            info!(pro_id, seeded = seeded.len(), "seeded national holidays");
            write_output(None, &to_pretty(&seeded)?)?;
        }
        Commands::Expand {
            input,
            from,
            to,
            timezone,
        } => {
            if let Some(tz) = timezone {
                config.timezone = tz;
            }
            let records: Vec<WorkingHourRecord> = read_json(input.as_deref(), "working-hours")?;
            let blocks = reduce_business_hours(&records);
            let instances = expand_business_hours(
                &blocks,
                parse_date(&from)?,
                parse_date(&to)?,
                &config.timezone,
            )?;
            write_output(None, &to_pretty(&instances)?)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("Invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn inactivity_span(record: &InactivityRecord, options: &EngineOptions) -> Result<InactivitySpan> {
    let end = inactivity::resolve_end_with(record, options)?;
    Ok(InactivitySpan {
        start: inactivity::resolve_start(record).to_string(),
        end: end.map(|e| e.to_string()),
    })
}

fn to_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    out.push('\n');
    Ok(out)
}

/// Parse a JSON document of `kind` from `path`, or from stdin when no path is given.
fn read_json<T: DeserializeOwned>(path: Option<&str>, kind: &str) -> Result<T> {
    let source = path.unwrap_or("stdin");
    let text = match path {
        Some(path) => std::fs::read_to_string(path),
        None => io::read_to_string(io::stdin()),
    }
    .with_context(|| format!("Cannot read {} input from {}", kind, source))?;
    debug!(kind, source, bytes = text.len(), "read input");
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {} JSON from {}", kind, source))
}

/// Write a rendered document to `path`, or stdout when no path is given.
fn write_output(path: Option<&str>, rendered: &str) -> Result<()> {
    let Some(path) = path else {
        print!("{}", rendered);
        return Ok(());
    };
    std::fs::write(path, rendered)
        .with_context(|| format!("Cannot write output to {}", path))?;
    info!(path, "wrote output");
    Ok(())
}
