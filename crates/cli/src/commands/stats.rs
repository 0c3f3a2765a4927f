//! Statistics commands.
//!
//! # Usage
//!
//! ```bash
//! mb-cli stats summary
//! mb-cli stats head-to-head Arsenal Chelsea
//! ```

use matchbook_admin::db::GameRepository;
use matchbook_admin::services::GameService;

use matchbook_core::analytics::RECENT_DAYS;

use super::{emit, emit_json, today};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Desk-wide summary.
pub async fn summary(json: bool) -> CommandResult {
    let pool = super::connect().await?;
    let games = GameService::new(GameRepository::new(&pool));

    let summary = games.summary(today()).await?;

    if json {
        return emit_json(&summary);
    }
    emit(format_args!("Total games:        {}", summary.total_games))?;
    emit(format_args!("Participants:       {}", summary.participants))?;
    emit(format_args!(
        "Avg combined score: {:.2}",
        summary.average_total_score
    ))?;
    emit(format_args!(
        "Decisive games:     {:.1}%",
        summary.decisive_rate * 100.0
    ))?;
    emit(format_args!(
        "Last {RECENT_DAYS} days:       {}",
        summary.recent_games
    ))?;
    emit(format_args!(
        "Top league:         {}",
        summary.top_league().map_or("None", |t| t.name.as_str())
    ))?;

    if !summary.by_sport.is_empty() {
        emit("\nGames by sport:")?;
        for tally in &summary.by_sport {
            emit(format_args!("  {:<12} {}", tally.name, tally.games))?;
        }
    }
    if !summary.top_leagues.is_empty() {
        emit("\nTop leagues:")?;
        for tally in &summary.top_leagues {
            emit(format_args!("  {:<24} {}", tally.name, tally.games))?;
        }
    }
    if !summary.by_month.is_empty() {
        emit("\nGames by month:")?;
        for tally in &summary.by_month {
            emit(format_args!("  {}  {}", tally.name, tally.games))?;
        }
    }
    Ok(())
}

/// Record between two participants.
pub async fn head_to_head(team_a: &str, team_b: &str, json: bool) -> CommandResult {
    let pool = super::connect().await?;
    let games = GameService::new(GameRepository::new(&pool));

    let record = games.head_to_head(team_a, team_b).await?;

    if json {
        return emit_json(&record);
    }
    if record.games == 0 {
        emit(format_args!(
            "{} and {} have not played each other.",
            record.team_a, record.team_b
        ))?;
        return Ok(());
    }
    emit(format_args!(
        "{} vs {}: {} game(s)",
        record.team_a, record.team_b, record.games
    ))?;
    emit(format_args!(
        "  Wins:   {} {} - {} {}",
        record.team_a, record.wins_a, record.wins_b, record.team_b
    ))?;
    emit(format_args!("  Draws:  {}", record.draws))?;
    emit(format_args!(
        "  Points: {} - {}",
        record.points_a, record.points_b
    ))?;
    Ok(())
}
