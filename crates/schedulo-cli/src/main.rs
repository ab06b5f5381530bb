//! `schedulo` CLI — detect task/calendar conflicts and build daily task digests.
//!
//! ## Usage
//!
//! ```sh
//! # Resolve conflicts for a request (stdin → stdout)
//! cat request.json | schedulo resolve
//!
//! # Read wall-clock days in a specific timezone, pretty-print to a file
//! schedulo --timezone America/New_York resolve -i request.json -o response.json --pretty
//!
//! # Does a single task collide with a single event?
//! schedulo check --task 2024-06-10T09:30:00 --start 2024-06-10T09:00:00 --end 2024-06-10T10:00:00
//!
//! # Emit today's push notifications from a JSON task store
//! schedulo digest -i store.json --date 2024-06-10
//!
//! # Load settings from a TOML file (flags still win)
//! schedulo --config schedulo.toml resolve -i request.json
//! ```

use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use schedulo_core::digest::{self, InMemoryStore, NotificationSender, PushNotification};
use schedulo_core::request::parse_timestamp;
use schedulo_core::{DstPolicy, EngineConfig, ErrorKind};
use tracing_subscriber::EnvFilter;

/// Exit status for a request rejected as incomplete.
const EXIT_BAD_REQUEST: i32 = 2;

#[derive(Parser)]
#[command(
    name = "schedulo",
    version,
    about = "Task/calendar conflict detection"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    /// IANA timezone whose wall clock defines calendar days (overrides config)
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// Give up the free-day search after this many days (overrides config)
    #[arg(long, global = true)]
    max_search_days: Option<u32>,

    /// How to treat suggested times that fall in a DST gap (overrides config)
    #[arg(long, global = true, value_enum)]
    dst_policy: Option<PolicyArg>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect conflicts in a request and suggest new due dates
    Resolve {
        /// Request JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Pretty-print the response JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Check a single task due date against a single event
    Check {
        /// Task due date
        #[arg(long)]
        task: String,
        /// Event start
        #[arg(long)]
        start: String,
        /// Event end
        #[arg(long)]
        end: String,
    },
    /// Print push notifications for tasks due on a given day
    Digest {
        /// Task store JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Day to summarize, YYYY-MM-DD (defaults to today on the configured clock)
        #[arg(long)]
        date: Option<String>,
    },
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

    let config = build_config(&cli)?;

    match cli.command {
        Commands::Resolve {
            input,
            output,
            pretty,
        } => {
            let json = read_input(input.as_deref())?;
            let report = match schedulo_core::handle(&json, &config) {
                Ok(report) => report,
                Err(e) if e.kind() == ErrorKind::BadRequest => {
                    eprintln!("Error: {}", e);
                    process::exit(EXIT_BAD_REQUEST);
                }
                Err(e) => return Err(e).context("Failed to resolve conflicts"),
            };
            let body = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            write_output(output.as_deref(), &body)?;
        }
        Commands::Check { task, start, end } => {
            let clock = config.clock()?;
            let task = parse_timestamp(&task, "task", &clock)?;
            let start = parse_timestamp(&start, "start", &clock)?;
            let end = parse_timestamp(&end, "end", &clock)?;
            let hit = schedulo_core::overlaps(task, start, end, &clock);
            println!("{}", if hit { "overlap" } else { "no overlap" });
        }
        Commands::Digest { input, date } => {
            let clock = config.clock()?;
            let store = InMemoryStore::from_json(&read_input(input.as_deref())?)
                .context("Failed to parse task store")?;
            let today = match date {
                Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .with_context(|| format!("Invalid --date: {}", raw))?,
                None => clock.local(Utc::now()).date(),
            };
            let report = digest::run_daily_digest(&store, &StdoutSender, &clock, today)
                .context("Daily digest failed")?;
            eprintln!(
                "Checked {} users, notified {}, {} without push token, {} fetch failures, {} send failures",
                report.users_checked,
                report.notified,
                report.without_token,
                report.fetch_failures,
                report.send_failures
            );
        }
    }

    Ok(())
}

/// Writes each notification to stdout as one JSON line.
struct StdoutSender;

impl NotificationSender for StdoutSender {
    fn send(&self, notification: &PushNotification) -> schedulo_core::error::Result<()> {
        println!("{}", serde_json::to_string(notification)?);
        Ok(())
    }
}

/// Start from the config file (or defaults) and apply command-line overrides.
fn build_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match cli.config.as_deref() {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path))?,
        None => EngineConfig::default(),
    };

    if let Some(tz) = &cli.timezone {
        config.timezone = tz.clone();
    }
    if let Some(days) = cli.max_search_days {
        config.max_search_days = days;
    }
    if let Some(policy) = cli.dst_policy {
        config.dst_policy = policy.into();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
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
