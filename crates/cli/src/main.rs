//! Matchbook CLI - results desk front end.
//!
//! # Usage
//!
//! ```bash
//! # Create or upgrade the schema
//! mb-cli migrate
//!
//! # Register an operator and check a login
//! echo 'Str0ng!Pass' | mb-cli admin register -u desk_lead -e lead@example.com -n "Desk Lead"
//! MATCHBOOK_PASSWORD='Str0ng!Pass' mb-cli admin login -u desk_lead
//!
//! # Record and browse games
//! mb-cli game add --sport Soccer --league "Premier League" \
//!     --team1 Arsenal --team2 Chelsea --score 2-1 --date 2024-03-01
//! mb-cli game list --search arsenal
//! mb-cli stats summary
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `admin` - Register, log in and manage operators
//! - `game` - Add, list, show, update, delete and export games
//! - `stats` - Summary and head-to-head statistics
//! - `seed games` - Load games from a YAML file
//! - `sports` - Show the sport registry

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use matchbook_admin::config;
use matchbook_admin::logging;

mod commands;

use commands::game::{Filters, GameChanges, GameFields};

#[derive(Parser)]
#[command(name = "mb-cli")]
#[command(author, version, about = "Matchbook results desk")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage operator accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Record and browse games
    Game {
        #[command(subcommand)]
        action: GameAction,
    },
    /// Statistics over recorded games
    Stats {
        #[command(subcommand)]
        action: StatsAction,
    },
    /// Bulk-load data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Show registered sports and their score ranges
    Sports,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Register a new operator (password from MATCHBOOK_PASSWORD or stdin)
    Register {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long, default_value = "")]
        name: String,
    },
    /// Check a login (password from MATCHBOOK_PASSWORD or stdin)
    Login {
        /// Username or email
        #[arg(short, long)]
        username: String,
    },
    /// List operators
    List,
    /// Allow an operator to log in again
    Activate { username: String },
    /// Block an operator from logging in
    Deactivate { username: String },
    /// Set a new password (from MATCHBOOK_PASSWORD or stdin)
    Passwd { username: String },
    /// Delete an operator
    Delete { username: String },
}

#[derive(Subcommand)]
enum GameAction {
    /// Record a game
    Add(GameFields),
    /// List games
    List(Filters),
    /// Show one game
    Show { id: i32 },
    /// Edit a game
    Update {
        id: i32,
        #[command(flatten)]
        changes: GameChanges,
    },
    /// Delete a game
    Delete { id: i32 },
    /// Write a text report
    Export {
        path: PathBuf,
        #[command(flatten)]
        filters: Filters,
    },
}

#[derive(Subcommand)]
enum StatsAction {
    /// Desk-wide summary
    Summary,
    /// Record between two participants
    HeadToHead { team_a: String, team_b: String },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Load games from a YAML file
    Games { file: PathBuf },
}

#[tokio::main]
async fn main() {
    // Load .env before reading the log format
    dotenvy::dotenv().ok();

    let format = config::log_format_from(&|key: &str| std::env::var(key).ok()).unwrap_or_default();
    logging::init_tracing(format);

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Register {
                username,
                email,
                name,
            } => commands::admin::register(&username, &email, &name, json).await?,
            AdminAction::Login { username } => commands::admin::login(&username, json).await?,
            AdminAction::List => commands::admin::list(json).await?,
            AdminAction::Activate { username } => {
                commands::admin::set_active(&username, true).await?;
            }
            AdminAction::Deactivate { username } => {
                commands::admin::set_active(&username, false).await?;
            }
            AdminAction::Passwd { username } => commands::admin::change_password(&username).await?,
            AdminAction::Delete { username } => commands::admin::delete(&username).await?,
        },
        Commands::Game { action } => match action {
            GameAction::Add(fields) => commands::game::add(fields, json).await?,
            GameAction::List(filters) => commands::game::list(filters, json).await?,
            GameAction::Show { id } => commands::game::show(id, json).await?,
            GameAction::Update { id, changes } => commands::game::update(id, changes, json).await?,
            GameAction::Delete { id } => commands::game::delete(id).await?,
            GameAction::Export { path, filters } => commands::game::export(&path, filters).await?,
        },
        Commands::Stats { action } => match action {
            StatsAction::Summary => commands::stats::summary(json).await?,
            StatsAction::HeadToHead { team_a, team_b } => {
                commands::stats::head_to_head(&team_a, &team_b, json).await?;
            }
        },
        Commands::Seed { target } => match target {
            SeedTarget::Games { file } => commands::seed::games(&file).await?,
        },
        Commands::Sports => commands::sports(json)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_game_add() {
        let cli = Cli::try_parse_from([
            "mb-cli", "game", "add", "--sport", "Soccer", "--league", "Premier League", "--team1",
            "Arsenal", "--team2", "Chelsea", "--score", "2-1", "--date", "2024-03-01",
        ]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_parse_list_sort() {
        assert!(Cli::try_parse_from(["mb-cli", "game", "list", "--sort", "oldest"]).is_ok());
        assert!(Cli::try_parse_from(["mb-cli", "game", "list", "--sort", "random"]).is_err());
    }

    #[test]
    fn test_json_flag_is_global() {
        let cli = Cli::try_parse_from(["mb-cli", "stats", "summary", "--json"]);
        assert!(cli.is_ok_and(|c| c.json));
    }
}
