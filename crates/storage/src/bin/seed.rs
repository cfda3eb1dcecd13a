use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use storage::repository::Storage;
use storage::seed::{DEFAULT_TRAINER_EMAIL, SeedOptions, load_exercise_file, seed_demo};

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    trainer_email: String,
    clients: u32,
    sessions: u32,
    now: Option<DateTime<Utc>>,
    exercises: Option<PathBuf>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidClients { raw: String },
    InvalidSessions { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidClients { raw } => write!(f, "invalid --clients value: {raw}"),
            ArgsError::InvalidSessions { raw } => write!(f, "invalid --sessions value: {raw}"),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("GYM_DB_URL").unwrap_or_else(|_| "sqlite://gym.sqlite3?mode=rwc".into());
        let mut trainer_email =
            std::env::var("GYM_TRAINER_EMAIL").unwrap_or_else(|_| DEFAULT_TRAINER_EMAIL.into());
        let mut clients = 3;
        let mut sessions = 4;
        let mut now: Option<DateTime<Utc>> = None;
        let mut exercises: Option<PathBuf> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--trainer-email" => {
                    trainer_email = require_value(&mut args, "--trainer-email")?;
                }
                "--clients" => {
                    let value = require_value(&mut args, "--clients")?;
                    clients = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidClients { raw: value.clone() })?;
                }
                "--sessions" => {
                    let value = require_value(&mut args, "--sessions")?;
                    sessions = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidSessions { raw: value.clone() })?;
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value.clone() })?
                        .with_timezone(&Utc);
                    now = Some(parsed);
                }
                "--exercises" => {
                    exercises = Some(PathBuf::from(require_value(&mut args, "--exercises")?));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            trainer_email,
            clients,
            sessions,
            now,
            exercises,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite://gym.sqlite3?mode=rwc)");
    eprintln!("  --trainer-email <email>   Trainer to seed for (default: {DEFAULT_TRAINER_EMAIL})");
    eprintln!("  --clients <n>             Number of clients to add (default: 3)");
    eprintln!("  --sessions <n>            Number of logged sessions (default: 4)");
    eprintln!("  --exercises <path.json>   Exercise library to import instead of the built-in one");
    eprintln!("  --now <rfc3339>           Fixed current time for deterministic seeding");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  GYM_DB_URL, GYM_TRAINER_EMAIL");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let mut options = SeedOptions::new(args.now.unwrap_or_else(Utc::now));
    options.trainer_email = args.trainer_email;
    options.clients = args.clients;
    options.sessions = args.sessions;
    if let Some(path) = args.exercises.as_deref() {
        options.exercises = Some(load_exercise_file(path)?);
    }

    let report = seed_demo(&storage, options).await?;

    println!(
        "Seeded trainer {} with {} exercises, {} workouts, {} clients and {} sessions into {}",
        report.trainer_id,
        report.exercises,
        report.workouts,
        report.clients,
        report.sessions,
        args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
