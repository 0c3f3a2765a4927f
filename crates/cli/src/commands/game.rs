//! Game recording commands.
//!
//! # Usage
//!
//! ```bash
//! mb-cli game add --sport Soccer --league "Premier League" \
//!     --team1 Arsenal --team2 Chelsea --score 2-1 --date 2024-03-01
//! mb-cli game list --sport soccer --sort oldest
//! mb-cli game show 12
//! mb-cli game update 12 --score 3-1
//! mb-cli game delete 12
//! mb-cli game export results.txt --league NBA
//! ```

use std::path::Path;

use chrono::Utc;
use clap::Args;

use matchbook_admin::db::GameRepository;
use matchbook_admin::export;
use matchbook_admin::services::{GameError, GameService, Saved};
use matchbook_core::query::{GameQuery, GameSort};
use matchbook_core::validation::{Severity, ValidationIssue};
use matchbook_core::{Game, GameDraft, GameId};

use super::{emit, emit_json, today};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Every field of a new game.
#[derive(Debug, Args)]
pub struct GameFields {
    #[arg(long)]
    pub sport: String,
    #[arg(long)]
    pub league: String,
    #[arg(long)]
    pub team1: String,
    #[arg(long)]
    pub team2: String,
    /// Final score as `A-B`
    #[arg(long)]
    pub score: String,
    /// Date as `YYYY-MM-DD`
    #[arg(long)]
    pub date: String,
}

impl From<GameFields> for GameDraft {
    fn from(fields: GameFields) -> Self {
        Self {
            sport: fields.sport,
            league: fields.league,
            team1: fields.team1,
            team2: fields.team2,
            score: fields.score,
            date: fields.date,
        }
    }
}

/// Fields to change on an existing game; omitted ones keep their value.
#[derive(Debug, Args)]
pub struct GameChanges {
    #[arg(long)]
    pub sport: Option<String>,
    #[arg(long)]
    pub league: Option<String>,
    #[arg(long)]
    pub team1: Option<String>,
    #[arg(long)]
    pub team2: Option<String>,
    #[arg(long)]
    pub score: Option<String>,
    #[arg(long)]
    pub date: Option<String>,
}

impl GameChanges {
    fn apply(self, mut draft: GameDraft) -> GameDraft {
        let fields = [
            (self.sport, &mut draft.sport),
            (self.league, &mut draft.league),
            (self.team1, &mut draft.team1),
            (self.team2, &mut draft.team2),
            (self.score, &mut draft.score),
            (self.date, &mut draft.date),
        ];
        for (change, slot) in fields {
            if let Some(value) = change {
                *slot = value;
            }
        }
        draft
    }
}

/// Filter and sort options shared by `list` and `export`.
#[derive(Debug, Args)]
pub struct Filters {
    #[arg(long)]
    pub sport: Option<String>,
    #[arg(long)]
    pub league: Option<String>,
    /// Substring of sport, league, teams or score
    #[arg(long)]
    pub search: Option<String>,
    /// newest, oldest, sport or league
    #[arg(long, default_value = "newest")]
    pub sort: GameSort,
}

impl From<Filters> for GameQuery {
    fn from(filters: Filters) -> Self {
        Self {
            sport: filters.sport,
            league: filters.league,
            search: filters.search,
            sort: filters.sort,
        }
    }
}

/// Record a new game.
pub async fn add(fields: GameFields, json: bool) -> CommandResult {
    let pool = super::connect().await?;
    let games = GameService::new(GameRepository::new(&pool));

    let saved = report_rejection(games.create(&fields.into(), today()).await)?;
    print_saved(&saved, "Recorded", json)
}

/// List games.
pub async fn list(filters: Filters, json: bool) -> CommandResult {
    let pool = super::connect().await?;
    let games = GameService::new(GameRepository::new(&pool));

    let found = games.list(&filters.into()).await?;

    if json {
        return emit_json(&found);
    }
    if found.is_empty() {
        emit("No games found.")?;
        return Ok(());
    }
    for game in &found {
        emit(row(game))?;
    }
    emit(format_args!("{} game(s)", found.len()))?;
    Ok(())
}

/// Show one game.
pub async fn show(id: i32, json: bool) -> CommandResult {
    let pool = super::connect().await?;
    let games = GameService::new(GameRepository::new(&pool));

    let game = games.get(GameId::new(id)).await?;

    if json {
        return emit_json(&game);
    }
    emit(format_args!("Game #{}", game.id))?;
    emit(format_args!("  Sport:   {}", game.sport))?;
    emit(format_args!("  League:  {}", game.league))?;
    emit(format_args!("  Teams:   {} vs {}", game.team1, game.team2))?;
    emit(format_args!("  Score:   {}", game.score))?;
    emit(format_args!("  Date:    {}", game.date))?;
    emit(format_args!("  Winner:  {}", game.winner_label()))?;
    emit(format_args!(
        "  Updated: {}",
        game.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ))?;
    Ok(())
}

/// Edit a game.
pub async fn update(id: i32, changes: GameChanges, json: bool) -> CommandResult {
    let pool = super::connect().await?;
    let games = GameService::new(GameRepository::new(&pool));
    let id = GameId::new(id);

    let current = games.get(id).await?;
    let draft = changes.apply(GameDraft::from(&current));

    let saved = report_rejection(games.update(id, &draft, today()).await)?;
    print_saved(&saved, "Updated", json)
}

/// Delete a game.
pub async fn delete(id: i32) -> CommandResult {
    let pool = super::connect().await?;
    let games = GameService::new(GameRepository::new(&pool));

    games.delete(GameId::new(id)).await?;
    emit(format_args!("Deleted game #{id}"))?;
    Ok(())
}

/// Write a text report of matching games to `path`.
pub async fn export(path: &Path, filters: Filters) -> CommandResult {
    let pool = super::connect().await?;
    let games = GameService::new(GameRepository::new(&pool));

    let found = games.list(&filters.into()).await?;
    let report = export::render_report(&found, Utc::now());
    tokio::fs::write(path, report).await?;

    tracing::info!(games = found.len(), path = %path.display(), "Export written");
    emit(format_args!("Exported {} game(s) to {}", found.len(), path.display()))?;
    Ok(())
}

/// Print every issue of a rejected submission before passing the error on.
fn report_rejection(result: Result<Saved, GameError>) -> Result<Saved, GameError> {
    if let Err(GameError::Invalid(report)) = &result {
        for issue in report.issues() {
            // Output failures here would only hide the real error.
            let _ = emit(describe_issue(issue));
        }
    }
    result
}

fn print_saved(saved: &Saved, verb: &str, json: bool) -> CommandResult {
    if json {
        return emit_json(&saved.game);
    }
    for notice in &saved.notices {
        emit(describe_issue(notice))?;
    }
    emit(format_args!("{verb} game #{}", saved.game.id))?;
    emit(row(&saved.game))?;
    Ok(())
}

fn describe_issue(issue: &ValidationIssue) -> String {
    let level = match issue.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "info",
    };
    format!("{level:<8} {issue}")
}

fn row(game: &Game) -> String {
    format!(
        "{:>5}  {}  {:<11} {:<20} {} {} {}  ({})",
        game.id.as_i32(),
        game.date,
        game.sport,
        game.league,
        game.team1,
        game.score,
        game.team2,
        game.winner_label(),
    )
}
