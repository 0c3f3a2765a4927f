//! Game recording service.
//!
//! Every create and update runs full form validation against the games
//! already stored on the submitted date. Blocking issues abort the write;
//! warnings and notices are handed back with the saved record.

use chrono::NaiveDate;
use thiserror::Error;

use matchbook_core::analytics::{self, HeadToHead, Summary};
use matchbook_core::query::GameQuery;
use matchbook_core::validation::{self, ValidationContext, ValidationIssue, ValidationReport};
use matchbook_core::{Game, GameDraft, GameId};

use crate::db::{GameStore, RepositoryError};

/// Errors that can occur during game operations.
#[derive(Debug, Error)]
pub enum GameError {
    /// The submission has at least one blocking issue.
    #[error("game rejected: {0}")]
    Invalid(ValidationReport),

    /// No game with this ID.
    #[error("game {0} not found")]
    NotFound(GameId),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl GameError {
    /// The validation report, when the error is a rejection.
    #[must_use]
    pub const fn report(&self) -> Option<&ValidationReport> {
        match self {
            Self::Invalid(report) => Some(report),
            _ => None,
        }
    }
}

/// A stored game and the non-blocking notices raised while saving it.
#[derive(Debug, Clone)]
pub struct Saved {
    pub game: Game,
    pub notices: Vec<ValidationIssue>,
}

/// Game service.
pub struct GameService<S> {
    games: S,
}

impl<S: GameStore> GameService<S> {
    /// Create a new game service over a game store.
    #[must_use]
    pub const fn new(games: S) -> Self {
        Self { games }
    }

    /// Validate and store a new game.
    ///
    /// `today` anchors the accepted date window.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Invalid` when validation finds a blocking issue.
    pub async fn create(&self, draft: &GameDraft, today: NaiveDate) -> Result<Saved, GameError> {
        let existing = self.games_on_submitted_date(draft).await?;
        let checked = validation::validate_game(draft, &existing, &ValidationContext::new(today))
            .map_err(GameError::Invalid)?;

        let game = self.games.insert(&checked.game).await?;

        tracing::info!(
            game_id = %game.id,
            sport = %game.sport,
            notices = checked.notices.len(),
            "Game recorded"
        );
        Ok(Saved {
            game,
            notices: checked.notices,
        })
    }

    /// Get a game by ID.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NotFound` if no such game exists.
    pub async fn get(&self, id: GameId) -> Result<Game, GameError> {
        self.games.get(id).await?.ok_or(GameError::NotFound(id))
    }

    /// List games matching a query.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Repository` if the store fails.
    pub async fn list(&self, query: &GameQuery) -> Result<Vec<Game>, GameError> {
        let games = self.games.list_all().await?;
        Ok(query.apply(games))
    }

    /// Validate and apply an edit to an existing game.
    ///
    /// The game being edited never counts as its own duplicate.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NotFound` if no such game exists.
    /// Returns `GameError::Invalid` when validation finds a blocking issue.
    pub async fn update(
        &self,
        id: GameId,
        draft: &GameDraft,
        today: NaiveDate,
    ) -> Result<Saved, GameError> {
        self.get(id).await?;

        let existing = self.games_on_submitted_date(draft).await?;
        let checked =
            validation::validate_game(draft, &existing, &ValidationContext::editing(today, id))
                .map_err(GameError::Invalid)?;

        let game = self
            .games
            .update(id, &checked.game)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => GameError::NotFound(id),
                other => GameError::Repository(other),
            })?;

        tracing::info!(game_id = %game.id, "Game updated");
        Ok(Saved {
            game,
            notices: checked.notices,
        })
    }

    /// Delete a game.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NotFound` if no such game exists.
    pub async fn delete(&self, id: GameId) -> Result<(), GameError> {
        self.games.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => GameError::NotFound(id),
            other => GameError::Repository(other),
        })?;

        tracing::info!(game_id = %id, "Game deleted");
        Ok(())
    }

    /// Desk-wide statistics over every stored game.
    ///
    /// `today` anchors the recent-games window.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Repository` if the store fails.
    pub async fn summary(&self, today: NaiveDate) -> Result<Summary, GameError> {
        let games = self.games.list_all().await?;
        Ok(analytics::summarize(&games, today))
    }

    /// Record between two participants.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Repository` if the store fails.
    pub async fn head_to_head(&self, team_a: &str, team_b: &str) -> Result<HeadToHead, GameError> {
        let games = self.games.list_all().await?;
        Ok(analytics::head_to_head(&games, team_a, team_b))
    }

    /// Stored games sharing the draft's date, or none if the date is unparseable.
    async fn games_on_submitted_date(&self, draft: &GameDraft) -> Result<Vec<Game>, GameError> {
        match NaiveDate::parse_from_str(draft.date.trim(), "%Y-%m-%d") {
            Ok(date) => Ok(self.games.list_on_date(date).await?),
            Err(_) => Ok(Vec::new()),
        }
    }
}
