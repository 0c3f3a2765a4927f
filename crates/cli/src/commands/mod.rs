//! Command implementations and the helpers they share.

pub mod admin;
pub mod game;
pub mod migrate;
pub mod seed;
pub mod stats;

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use chrono::{Local, NaiveDate};
use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;

use matchbook_admin::config::DeskConfig;
use matchbook_admin::db;
use matchbook_core::sport;

/// Variable consulted before prompting for a password on stdin.
pub const PASSWORD_ENV: &str = "MATCHBOOK_PASSWORD";

/// Errors raised by the command layer itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("no password given: set MATCHBOOK_PASSWORD or pipe one line on stdin")]
    MissingPassword,

    #[error("failed to read stdin: {0}")]
    Stdin(#[from] io::Error),
}

/// Load configuration and open a pool.
pub async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    let config = DeskConfig::from_env()?;
    tracing::debug!(max_connections = config.max_connections, "Connecting to database");
    Ok(db::create_pool(&config).await?)
}

/// The operator's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Read a password from `MATCHBOOK_PASSWORD`, or one line of stdin.
pub fn read_password() -> Result<String, CliError> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(password);
    }

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        return Err(CliError::MissingPassword);
    }
    Ok(password.to_owned())
}

/// Write one line of command output to stdout.
pub fn emit(line: impl Display) -> io::Result<()> {
    writeln!(io::stdout().lock(), "{line}")
}

/// Write a value as pretty JSON to stdout.
pub fn emit_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(value)?;
    emit(json)?;
    Ok(())
}

/// List the sport registry.
pub fn sports(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        return emit_json(&sport::SPORTS);
    }

    for rule in sport::SPORTS {
        let leagues: Vec<&str> = sport::leagues_for(rule.name).collect();
        emit(format_args!(
            "{:<12} {:>3}-{:<3} {}",
            rule.name,
            rule.min,
            rule.max,
            leagues.join(", ")
        ))?;
    }
    Ok(())
}
