//! `avail` CLI — inspect and edit a teacher's weekly availability from the command line.
//!
//! Slot collections are JSON arrays in the profile API shape
//! (`[{"dayOfWeek":"monday","startTime":"09:00","endTime":"10:00"}]`), read from
//! `-i <file>` or stdin.
//!
//! ## Usage
//!
//! ```sh
//! # Month grid for February 2026
//! avail month --month 2026-02 -i slots.json
//!
//! # Week grid containing a date, as JSON
//! avail week --date 2026-02-15 -i slots.json --json
//!
//! # Add a slot (validated) and write the updated collection back
//! avail add --day monday --start 09:00 --end 10:00 -i slots.json -o slots.json
//!
//! # Durations
//! avail duration 09:00 17:30
//! avail duration 09:00 09:30 --minutes
//!
//! # Audit a stored collection for overlaps
//! avail check -i slots.json
//!
//! # Free stretches on a day, and dated sessions for a range
//! avail gaps --day monday --from 08:00 --to 18:00 -i slots.json
//! avail sessions --from 2026-03-01 --to 2026-03-14 --tz Europe/Berlin --lesson 60 -i slots.json
//! ```

mod render;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use availability_engine::slot::SlotRecord;
use availability_engine::{
    duration, find_overlaps, project_sessions, AvailabilitySlot, CalendarGridBuilder, DayOfWeek,
    DstPolicy, DurationStyle, EngineConfig, SlotDuration, StoredSlots, TimeOfDay, WeeklySchedule,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "avail", version, about = "Weekly tutoring availability CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ~/.config/avail/config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// IANA timezone for "today" and sessions (overrides the config file)
    #[arg(long, global = true)]
    tz: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the 6-week grid for a month
    Month {
        /// Month to show as YYYY-MM (defaults to the current month)
        #[arg(long)]
        month: Option<String>,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Show the Monday-started week containing a date
    Week {
        /// Any date in the week, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Validate a slot and prepend it to the collection
    Add {
        #[command(flatten)]
        slot: SlotArgs,
        #[command(flatten)]
        io: IoArgs,
    },
    /// Remove a slot from the collection
    Remove {
        #[command(flatten)]
        slot: SlotArgs,
        #[command(flatten)]
        io: IoArgs,
    },
    /// List the collection grouped by day
    List {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Duration between two HH:mm times
    Duration {
        start: String,
        end: String,
        /// Print the raw minute count instead of text
        #[arg(long)]
        minutes: bool,
    },
    /// Report overlapping slots in a stored collection (exits non-zero if any)
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Free stretches between slots on one day
    Gaps {
        #[arg(long)]
        day: String,
        /// Window start, HH:mm
        #[arg(long, default_value = "00:00")]
        from: String,
        /// Window end, HH:mm
        #[arg(long, default_value = "23:59")]
        to: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Dated UTC sessions for a date range
    Sessions {
        /// First date, YYYY-MM-DD
        #[arg(long)]
        from: String,
        /// Last date (inclusive), YYYY-MM-DD
        #[arg(long)]
        to: String,
        /// Split sessions into lessons of this many minutes
        #[arg(long)]
        lesson: Option<u32>,
        /// DST gap handling (defaults to the config file)
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(clap::Args)]
struct ViewArgs {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Pretend today is this date, YYYY-MM-DD
    #[arg(long)]
    today: Option<String>,
    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
struct SlotArgs {
    /// Day of week (monday..sunday, any case)
    #[arg(long)]
    day: String,
    /// Start time, HH:mm
    #[arg(long)]
    start: String,
    /// End time, HH:mm
    #[arg(long)]
    end: String,
}

#[derive(clap::Args)]
struct IoArgs {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Skip,
    ShiftForward,
    WallClock,
}

impl From<PolicyArg> for DstPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Skip => DstPolicy::Skip,
            PolicyArg::ShiftForward => DstPolicy::ShiftForward,
            PolicyArg::WallClock => DstPolicy::WallClock,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => EngineConfig::load_default().context("Failed to load default config")?,
    };
    if let Some(tz) = cli.tz {
        config.timezone = Some(tz);
    }
    let timezone = config.timezone().context("Invalid timezone")?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Month { month, view } => {
            let schedule = read_schedule(view.input.as_deref())?;
            let builder = grid_builder(view.today.as_deref(), timezone)?;
            let reference = match month {
                Some(m) => parse_date(&format!("{}-01", m))
                    .with_context(|| format!("Invalid month '{}', expected YYYY-MM", m))?,
                None => builder.today(),
            };
            let grid = builder.build_month_grid(reference, schedule.slots());
            if view.json {
                println!("{}", serde_json::to_string_pretty(&grid)?);
            } else {
                print!("{}", render::month(reference, &grid));
            }
        }
        Commands::Week { date, view } => {
            let schedule = read_schedule(view.input.as_deref())?;
            let builder = grid_builder(view.today.as_deref(), timezone)?;
            let reference = match date {
                Some(d) => parse_date(&d)?,
                None => builder.today(),
            };
            let grid = builder.build_week_grid(reference, schedule.slots());
            if view.json {
                println!("{}", serde_json::to_string_pretty(&grid)?);
            } else {
                print!("{}", render::week(&grid));
            }
        }
        Commands::Add { slot, io } => {
            let candidate = parse_slot(&slot)?;
            let mut stored = read_stored(io.input.as_deref())?;
            if let Err(rejection) = stored.add(candidate, &config.validator()) {
                bail!("Cannot add {}: {}", candidate, rejection);
            }
            write_stored(io.output.as_deref(), &stored)?;
        }
        Commands::Remove { slot, io } => {
            let target = parse_slot(&slot)?;
            let mut stored = read_stored(io.input.as_deref())?;
            if !stored.remove(&target) {
                bail!("No slot {} in collection", target);
            }
            write_stored(io.output.as_deref(), &stored)?;
        }
        Commands::List { input } => {
            let schedule = read_schedule(input.as_deref())?;
            let by_day = schedule.by_day();
            let ordered: Vec<AvailabilitySlot> = by_day
                .iter()
                .flat_map(|(_, slots)| slots.iter().copied())
                .collect();
            print!("{}", render::slot_list(&ordered));
            println!(
                "{} slots, {} per week",
                schedule.len(),
                duration::humanize_minutes(u32::try_from(schedule.total_minutes()).unwrap_or(u32::MAX))
            );
        }
        Commands::Duration { start, end, minutes } => {
            let style = if minutes {
                DurationStyle::Minutes
            } else {
                DurationStyle::Human
            };
            match duration::format(&start, &end, style)? {
                SlotDuration::Minutes(m) => println!("{}", m),
                SlotDuration::Human(text) => println!("{}", text),
            }
        }
        Commands::Check { input } => {
            let schedule = read_schedule(input.as_deref())?;
            let found = find_overlaps(schedule.slots());
            if !found.is_empty() {
                print!("{}", render::overlaps(&found));
                bail!("{} overlapping slot pair(s) found", found.len());
            }
            println!("No overlapping slots ({} checked)", schedule.len());
        }
        Commands::Gaps {
            day,
            from,
            to,
            input,
        } => {
            let day: DayOfWeek = day.parse()?;
            let from: TimeOfDay = from.parse()?;
            let to: TimeOfDay = to.parse()?;
            let schedule = read_schedule(input.as_deref())?;
            print!("{}", render::gaps(&schedule.free_gaps(day, from, to)));
        }
        Commands::Sessions {
            from,
            to,
            lesson,
            policy,
            input,
        } => {
            let Some(tz) = config.timezone.as_deref() else {
                bail!("Sessions need a timezone: pass --tz or set `timezone` in the config file");
            };
            let schedule = read_schedule(input.as_deref())?;
            let policy = policy.map(DstPolicy::from).unwrap_or(config.dst_policy);
            let sessions =
                project_sessions(&schedule, parse_date(&from)?, parse_date(&to)?, tz, policy)?;
            let sessions: Vec<_> = match lesson {
                Some(minutes) => sessions.iter().flat_map(|s| s.split(minutes)).collect(),
                None => sessions,
            };
            println!("{}", serde_json::to_string_pretty(&sessions)?);
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env("AVAIL_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn grid_builder(today: Option<&str>, timezone: Option<chrono_tz::Tz>) -> Result<CalendarGridBuilder> {
    Ok(match (today, timezone) {
        (Some(today), _) => CalendarGridBuilder::new(parse_date(today)?),
        (None, Some(tz)) => CalendarGridBuilder::in_timezone(tz),
        (None, None) => CalendarGridBuilder::local(),
    })
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("Invalid date '{}'", s))
}

fn parse_slot(args: &SlotArgs) -> Result<AvailabilitySlot> {
    AvailabilitySlot::parse(&args.day, &args.start, &args.end).context("Invalid slot")
}

/// Stored collections are read leniently: malformed entries are logged and skipped.
fn read_schedule(path: Option<&str>) -> Result<WeeklySchedule> {
    let raw = read_input(path)?;
    if raw.trim().is_empty() {
        return Ok(WeeklySchedule::new());
    }
    let records: Vec<SlotRecord> =
        serde_json::from_str(&raw).context("Failed to parse slots JSON")?;
    Ok(WeeklySchedule::from_records_lossy(&records))
}

/// Collections about to be written back keep unreadable records verbatim.
fn read_stored(path: Option<&str>) -> Result<StoredSlots> {
    let raw = read_input(path)?;
    if raw.trim().is_empty() {
        return Ok(StoredSlots::default());
    }
    let stored: StoredSlots = serde_json::from_str(&raw).context("Failed to parse slots JSON")?;
    for record in stored.unparsed() {
        tracing::warn!(?record, "keeping unreadable availability record unchanged");
    }
    Ok(stored)
}

fn write_stored(path: Option<&str>, stored: &StoredSlots) -> Result<()> {
    let mut json = serde_json::to_string_pretty(stored)?;
    json.push('\n');
    write_output(path, &json)
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
            print!("{}", content);
        }
    }
    Ok(())
}
