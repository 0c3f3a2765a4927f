//! Game records.
//!
//! - [`GameDraft`] is raw operator input, every field still a string.
//! - [`NewGame`] is input that passed [`crate::validation::validate_game`].
//! - [`Game`] is a persisted record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{GameId, Score};

/// Raw game input as submitted by an operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDraft {
    pub sport: String,
    pub league: String,
    pub team1: String,
    pub team2: String,
    /// `"A-B"` score string.
    pub score: String,
    /// `YYYY-MM-DD`.
    pub date: String,
}

/// A validated game, ready to be stored.
///
/// Names are trimmed and the sport carries its canonical registry spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGame {
    pub sport: String,
    pub league: String,
    pub team1: String,
    pub team2: String,
    pub score: Score,
    pub date: NaiveDate,
}

/// A stored game record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub sport: String,
    pub league: String,
    pub team1: String,
    pub team2: String,
    pub score: Score,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of a game from the first participant's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Team1Win,
    Team2Win,
    Draw,
}

impl Outcome {
    /// Derive the outcome from a score.
    #[must_use]
    pub const fn of(score: Score) -> Self {
        if score.team1() > score.team2() {
            Self::Team1Win
        } else if score.team2() > score.team1() {
            Self::Team2Win
        } else {
            Self::Draw
        }
    }
}

impl Game {
    /// Outcome of this game.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        Outcome::of(self.score)
    }

    /// Winner's name, or `"Draw"`.
    #[must_use]
    pub fn winner_label(&self) -> &str {
        match self.outcome() {
            Outcome::Team1Win => &self.team1,
            Outcome::Team2Win => &self.team2,
            Outcome::Draw => "Draw",
        }
    }

    /// Whether `team` played in this game (trimmed, case-insensitive).
    #[must_use]
    pub fn involves(&self, team: &str) -> bool {
        same_name(&self.team1, team) || same_name(&self.team2, team)
    }
}

impl From<&Game> for GameDraft {
    fn from(game: &Game) -> Self {
        Self {
            sport: game.sport.clone(),
            league: game.league.clone(),
            team1: game.team1.clone(),
            team2: game.team2.clone(),
            score: game.score.to_string(),
            date: game.date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Participant-name equality used throughout the desk.
#[must_use]
pub fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::Game;
    use crate::types::{GameId, Score};

    /// Build a stored game for tests.
    pub fn game(
        id: i32,
        sport: &str,
        team1: &str,
        team2: &str,
        score: (u32, u32),
        date: NaiveDate,
    ) -> Game {
        let stamp = Utc.timestamp_opt(1_700_000_000, 0).single().unwrap_or_default();
        Game {
            id: GameId::new(id),
            sport: sport.to_owned(),
            league: "Premier League".to_owned(),
            team1: team1.to_owned(),
            team2: team2.to_owned(),
            score: Score::new(score.0, score.1),
            date,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{date, game};
    use super::*;

    #[test]
    fn test_outcome() {
        assert_eq!(Outcome::of(Score::new(2, 1)), Outcome::Team1Win);
        assert_eq!(Outcome::of(Score::new(0, 3)), Outcome::Team2Win);
        assert_eq!(Outcome::of(Score::new(1, 1)), Outcome::Draw);
    }

    #[test]
    fn test_winner_label() {
        let g = game(1, "Soccer", "Arsenal", "Chelsea", (2, 1), date(2024, 3, 1));
        assert_eq!(g.winner_label(), "Arsenal");

        let g = game(2, "Soccer", "Arsenal", "Chelsea", (0, 0), date(2024, 3, 1));
        assert_eq!(g.winner_label(), "Draw");
    }

    #[test]
    fn test_involves_ignores_case() {
        let g = game(1, "Soccer", "Arsenal", "Chelsea", (2, 1), date(2024, 3, 1));
        assert!(g.involves(" arsenal"));
        assert!(!g.involves("Spurs"));
    }

    #[test]
    fn test_draft_from_game() {
        let g = game(1, "Soccer", "Arsenal", "Chelsea", (2, 1), date(2024, 3, 1));
        let draft = GameDraft::from(&g);
        assert_eq!(draft.score, "2-1");
        assert_eq!(draft.date, "2024-03-01");
    }
}
