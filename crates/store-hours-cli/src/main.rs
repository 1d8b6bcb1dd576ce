use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use store_hours::clock::{local_now, parse_local_datetime};
use store_hours::StoreConfig;

#[derive(Parser)]
#[command(name = "store-hours", about = "Store availability: is the store open right now?")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the store's open/closed status
    Status {
        /// Store config JSON file (reads stdin if omitted or "-")
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Instant to evaluate at: RFC 3339, or local YYYY-MM-DDTHH:MM[:SS]
        #[arg(long)]
        at: Option<String>,

        /// Store timezone (IANA name)
        #[arg(long, env = "STORE_HOURS_TZ", default_value = "UTC")]
        timezone: String,

        /// Print the full status as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report schedule and pause entries that evaluation treats as closed or ignores
    Validate {
        /// Store config JSON file (reads stdin if omitted or "-")
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "store_hours=warn".into()),
        )
        .with_writer(io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Status {
            config,
            at,
            timezone,
            json,
        } => {
            let config = load_config(config.as_ref())?;
            let now = resolve_now(at.as_deref(), &timezone)?;
            tracing::debug!(%now, %timezone, "resolved store-local instant");

            let status = config.evaluate(now);
            if json {
                let output = serde_json::to_string_pretty(&status)
                    .context("failed to serialize status")?;
                println!("{}", output);
            } else {
                println!("{}", status);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate { config } => {
            let config = load_config(config.as_ref())?;
            let issues = config.validate();
            if issues.is_empty() {
                println!("ok");
                return Ok(ExitCode::SUCCESS);
            }
            for issue in &issues {
                println!("{}", issue);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Read the config from a file, or from stdin if path is None or "-".
fn load_config(path: Option<&PathBuf>) -> Result<StoreConfig> {
    let raw = match path {
        Some(p) if p.to_str() != Some("-") => fs::read_to_string(p)
            .with_context(|| format!("failed to read config file: {}", p.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read config from stdin")?;
            buf
        }
    };
    StoreConfig::from_json(&raw).context("failed to parse store config")
}

/// The store-local instant to evaluate at.
///
/// RFC 3339 input is an absolute instant and is converted into `timezone`;
/// anything else is taken as local wall-clock time as written.
fn resolve_now(at: Option<&str>, timezone: &str) -> Result<NaiveDateTime> {
    let utc = match at {
        None => Utc::now(),
        Some(s) => match DateTime::parse_from_rfc3339(s.trim()) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(_) => return Ok(parse_local_datetime(s)?),
        },
    };
    local_now(utc, timezone).with_context(|| format!("cannot resolve time in '{}'", timezone))
}
