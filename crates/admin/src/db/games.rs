//! Game repository for database operations.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use matchbook_core::{Game, GameId, NewGame, Score};

use super::{GameStore, RepositoryError};

const GAME_COLUMNS: &str = "id, sport, league, team1, team2, score, date, created_at, updated_at";

/// Internal row type for `PostgreSQL` game queries.
#[derive(Debug, sqlx::FromRow)]
struct GameRow {
    id: i32,
    sport: String,
    league: String,
    team1: String,
    team2: String,
    score: String,
    date: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<GameRow> for Game {
    type Error = RepositoryError;

    fn try_from(row: GameRow) -> Result<Self, Self::Error> {
        let score = Score::parse(&row.score).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid score in game {}: {e}", row.id))
        })?;

        Ok(Self {
            id: GameId::new(row.id),
            sport: row.sport,
            league: row.league,
            team1: row.team1,
            team2: row.team2,
            score,
            date: row.date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for game database operations.
pub struct GameRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> GameRepository<'a> {
    /// Create a new game repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl GameStore for GameRepository<'_> {
    async fn insert(&self, game: &NewGame) -> Result<Game, RepositoryError> {
        let sql = format!(
            "INSERT INTO matchbook.game (sport, league, team1, team2, score, date) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {GAME_COLUMNS}"
        );
        let row = sqlx::query_as::<_, GameRow>(&sql)
            .bind(&game.sport)
            .bind(&game.league)
            .bind(&game.team1)
            .bind(&game.team2)
            .bind(game.score.to_string())
            .bind(game.date)
            .fetch_one(self.pool)
            .await?;

        row.try_into()
    }

    async fn get(&self, id: GameId) -> Result<Option<Game>, RepositoryError> {
        let sql = format!("SELECT {GAME_COLUMNS} FROM matchbook.game WHERE id = $1");
        let row = sqlx::query_as::<_, GameRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Game>, RepositoryError> {
        let sql = format!("SELECT {GAME_COLUMNS} FROM matchbook.game ORDER BY date DESC, id DESC");
        let rows = sqlx::query_as::<_, GameRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn list_on_date(&self, date: NaiveDate) -> Result<Vec<Game>, RepositoryError> {
        let sql = format!("SELECT {GAME_COLUMNS} FROM matchbook.game WHERE date = $1 ORDER BY id");
        let rows = sqlx::query_as::<_, GameRow>(&sql)
            .bind(date)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn update(&self, id: GameId, game: &NewGame) -> Result<Game, RepositoryError> {
        let sql = format!(
            "UPDATE matchbook.game \
             SET sport = $1, league = $2, team1 = $3, team2 = $4, score = $5, date = $6, \
                 updated_at = NOW() \
             WHERE id = $7 \
             RETURNING {GAME_COLUMNS}"
        );
        let row = sqlx::query_as::<_, GameRow>(&sql)
            .bind(&game.sport)
            .bind(&game.league)
            .bind(&game.team1)
            .bind(&game.team2)
            .bind(game.score.to_string())
            .bind(game.date)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    async fn delete(&self, id: GameId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM matchbook.game WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
