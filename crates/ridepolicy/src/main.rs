//! ridepolicy - booking policy and pricing rules from the command line
//!
//! Wires together:
//! - The SQLite policy store
//! - The policy engine
//! - Policy file import and validation
//!
//! Decisions are printed as JSON on stdout; logs go to stderr.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use ridepolicy_config::{load_policy_file, ConfigError, SchedulingPolicy, CURRENT_CONFIG_VERSION};
use ridepolicy_core::PolicyEngine;
use ridepolicy_store::{PolicyStore, SqliteConfigStore};
use ridepolicy_util::{default_db_path, parse_local_datetime, parse_trip_date};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// ridepolicy - booking eligibility, deadlines, pricing and reminders
#[derive(Parser, Debug)]
#[command(name = "ridepolicy")]
#[command(about = "Booking policy and pricing rules engine", long_about = None)]
struct Args {
    /// Policy database path (or set RIDEPOLICY_DB env var)
    #[arg(long, env = "RIDEPOLICY_DB", default_value_os_t = default_db_path())]
    db: PathBuf,

    /// Evaluate as of this local time ("YYYY-MM-DD HH:MM[:SS]") instead of now
    #[arg(long)]
    now: Option<String>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the effective policy
    Show,

    /// Update one setting, e.g. `set cutoffHours 2`
    Set {
        key: String,
        /// JSON value; bare words are taken as strings
        value: String,
    },

    /// Replace the stored policy with a TOML policy file
    Import { file: PathBuf },

    /// Validate a TOML policy file without storing it
    Validate { file: PathBuf },

    /// Decide whether a trip may be booked now
    Check {
        #[arg(long)]
        trip_date: String,
        #[arg(long)]
        departure: String,
    },

    /// Show when a trip's booking window opens
    Window {
        #[arg(long)]
        trip_date: String,
    },

    /// Decide whether a booking may still be cancelled
    Cancel {
        #[arg(long)]
        departure: String,
    },

    /// Decide whether a booking may still be rescheduled
    Reschedule {
        #[arg(long)]
        departure: String,
    },

    /// Price a fare
    Price {
        #[arg(long)]
        base: f64,
        /// Trip is in a peak hour
        #[arg(long)]
        peak: bool,
        /// Apply the student discount after pricing
        #[arg(long)]
        student: bool,
    },

    /// Decide whether a reminder is due for a trip
    Remind {
        #[arg(long)]
        departure: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    debug!(db = %args.db.display(), command = ?args.command, "Starting");

    let db = args.db.clone();
    let engine = || open_engine(&db);
    let now = resolve_now(args.now.as_deref())?;

    let output = match args.command {
        Command::Show => serde_json::to_value(engine()?.settings())?,
        Command::Set { key, value } => {
            let value = parse_setting_value(&value);
            let policy = engine()?
                .store()
                .try_update_setting(&key, value)
                .with_context(|| format!("Failed to update setting '{}'", key))?;
            serde_json::to_value(policy)?
        }
        Command::Import { file } => {
            let policy = load_policy_file(&file)
                .with_context(|| format!("Failed to load policy file {:?}", file))?;
            engine()?
                .store()
                .try_save(&policy)
                .context("Failed to store imported policy")?;
            info!(file = %file.display(), "Policy imported");
            serde_json::to_value(policy)?
        }
        Command::Validate { file } => serde_json::to_value(validate(&file)?)?,
        Command::Check {
            trip_date,
            departure,
        } => {
            let trip_date = parse_trip_date(&trip_date)?;
            let departure = parse_local_datetime(&departure)?;
            let decision = engine()?.is_booking_allowed(trip_date, departure, now);
            serde_json::to_value(decision.to_view())?
        }
        Command::Window { trip_date } => {
            let trip_date = parse_trip_date(&trip_date)?;
            serde_json::to_value(engine()?.next_booking_window(trip_date))?
        }
        Command::Cancel { departure } => {
            let departure = parse_local_datetime(&departure)?;
            json!({ "allowed": engine()?.can_cancel_booking(departure, now) })
        }
        Command::Reschedule { departure } => {
            let departure = parse_local_datetime(&departure)?;
            json!({ "allowed": engine()?.can_reschedule_booking(departure, now) })
        }
        Command::Price {
            base,
            peak,
            student,
        } => {
            let engine = engine()?;
            let mut price = engine.calculate_price(base, now, peak);
            if student {
                price = engine.apply_student_discount(price);
            }
            json!({ "price": price })
        }
        Command::Remind { departure } => {
            let departure = parse_local_datetime(&departure)?;
            let due = engine()?.due_reminder(departure, now);
            json!({ "due": due.is_some(), "offsetHours": due })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn open_engine(db: &Path) -> Result<PolicyEngine> {
    let backend = SqliteConfigStore::open(db)
        .with_context(|| format!("Failed to open database {:?}", db))?;
    debug!(db = %db.display(), "Store initialized");
    Ok(PolicyEngine::new(PolicyStore::new(Arc::new(backend))))
}

fn resolve_now(now: Option<&str>) -> Result<DateTime<Local>> {
    match now {
        Some(s) => Ok(parse_local_datetime(s)?),
        None => Ok(ridepolicy_util::now()),
    }
}

/// Interpret a command-line value as JSON, falling back to a plain string
fn parse_setting_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn validate(file: &Path) -> Result<SchedulingPolicy> {
    match load_policy_file(file) {
        Ok(policy) => {
            eprintln!("✓ Policy file is valid (version {})", CURRENT_CONFIG_VERSION);
            Ok(policy)
        }
        Err(ConfigError::ValidationFailed { errors }) => {
            eprintln!("✗ Policy validation failed");
            eprintln!();
            eprintln!("Validation errors ({}):", errors.len());
            for err in &errors {
                eprintln!("  - {}", err);
            }
            bail!("{} validation error(s) in {:?}", errors.len(), file)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to load policy file {:?}", file)),
    }
}
