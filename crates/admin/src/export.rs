//! Plain-text game reports.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use matchbook_core::Game;

const TITLE: &str = "MATCHBOOK RESULTS DESK - GAMES EXPORT";

/// Render games into a printable report.
///
/// Games are numbered in the order given.
#[must_use]
pub fn render_report(games: &[Game], generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{}\n", "=".repeat(50));
    let _ = writeln!(out, "Total Games Exported: {}", games.len());
    let _ = writeln!(
        out,
        "Export Date: {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    for (n, game) in games.iter().enumerate() {
        let _ = writeln!(out, "Game #{}", n + 1);
        let _ = writeln!(out, "{}", "-".repeat(20));
        let _ = writeln!(out, "Sport: {}", game.sport);
        let _ = writeln!(out, "League: {}", game.league);
        let _ = writeln!(out, "Teams: {} vs {}", game.team1, game.team2);
        let _ = writeln!(out, "Score: {}", game.score);
        let _ = writeln!(out, "Date: {}", game.date.format("%Y-%m-%d"));
        let _ = writeln!(out, "Winner: {}\n", game.winner_label());
    }

    out
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};

    use matchbook_core::{GameId, Score};

    use super::*;

    fn game(id: i32, team1: &str, team2: &str, score: Score) -> Game {
        let stamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().unwrap_or_default();
        Game {
            id: GameId::new(id),
            sport: "Soccer".to_owned(),
            league: "Premier League".to_owned(),
            team1: team1.to_owned(),
            team2: team2.to_owned(),
            score,
            date: NaiveDate::from_ymd_opt(2024, 4, 28).unwrap_or_default(),
            created_at: stamp,
            updated_at: stamp,
        }
    }

    #[test]
    fn test_report_layout() {
        let stamp = Utc.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).single().unwrap_or_default();
        let games = [
            game(1, "Arsenal", "Chelsea", Score::new(2, 1)),
            game(2, "Spurs", "Everton", Score::new(1, 1)),
        ];
        let report = render_report(&games, stamp);

        assert!(report.starts_with(TITLE));
        assert!(report.contains("Total Games Exported: 2"));
        assert!(report.contains("Export Date: 2024-05-02 08:30:00 UTC"));
        assert!(report.contains("Game #2"));
        assert!(report.contains("Teams: Arsenal vs Chelsea"));
        assert!(report.contains("Date: 2024-04-28"));
        assert!(report.contains("Winner: Arsenal"));
        assert!(report.contains("Winner: Draw"));
    }

    #[test]
    fn test_empty_report() {
        let report = render_report(&[], Utc::now());
        assert!(report.contains("Total Games Exported: 0"));
        assert!(!report.contains("Game #"));
    }
}
