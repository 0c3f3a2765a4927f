//! Test support for Matchbook service tests.
//!
//! [`MemoryStore`] implements both store traits over plain vectors, so the
//! auth and game services can be exercised without a database. Clones share
//! state, which lets a test hand one clone to a service and inspect another.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p matchbook-integration-tests
//!
//! # PostgreSQL repository tests
//! DATABASE_URL=postgres://localhost/matchbook_test \
//!     cargo test -p matchbook-integration-tests -- --ignored
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, NaiveDate, Utc};

use matchbook_admin::db::{AdminUserStore, GameStore, RepositoryError};
use matchbook_admin::models::{AdminUser, NewAdminUser};
use matchbook_core::{AdminUserId, Email, Game, GameDraft, GameId, NewGame, Username};

#[derive(Debug, Default)]
struct State {
    users: Vec<(AdminUser, String)>,
    games: Vec<Game>,
    next_user_id: i32,
    next_game_id: i32,
}

/// In-memory implementation of [`AdminUserStore`] and [`GameStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of stored games.
    #[must_use]
    pub fn game_count(&self) -> usize {
        self.lock().games.len()
    }

    /// Stored password hash for an account.
    #[must_use]
    pub fn password_hash(&self, id: AdminUserId) -> Option<String> {
        self.lock()
            .users
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(_, hash)| hash.clone())
    }
}

impl AdminUserStore for MemoryStore {
    async fn create(&self, user: &NewAdminUser) -> Result<AdminUser, RepositoryError> {
        let mut state = self.lock();
        if state
            .users
            .iter()
            .any(|(u, _)| u.username.as_str().eq_ignore_ascii_case(user.username.as_str()))
        {
            return Err(RepositoryError::Conflict("username already exists".to_owned()));
        }
        if state
            .users
            .iter()
            .any(|(u, _)| u.email.as_str().eq_ignore_ascii_case(user.email.as_str()))
        {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        state.next_user_id += 1;
        let created = AdminUser {
            id: AdminUserId::new(state.next_user_id),
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            is_active: true,
            created_at: Utc::now(),
            last_login: None,
        };
        state
            .users
            .push((created.clone(), user.password_hash.clone()));
        Ok(created)
    }

    async fn get_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<AdminUser>, RepositoryError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(u, _)| u.username.as_str().eq_ignore_ascii_case(username.as_str()))
            .map(|(u, _)| u.clone()))
    }

    async fn get_by_email(&self, email: &Email) -> Result<Option<AdminUser>, RepositoryError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(u, _)| u.email.as_str().eq_ignore_ascii_case(email.as_str()))
            .map(|(u, _)| u.clone()))
    }

    async fn get_password_hash(
        &self,
        login: &str,
    ) -> Result<Option<(AdminUser, String)>, RepositoryError> {
        let login = login.trim();
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(u, _)| {
                u.username.as_str().eq_ignore_ascii_case(login)
                    || u.email.as_str().eq_ignore_ascii_case(login)
            })
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<AdminUser>, RepositoryError> {
        Ok(self.lock().users.iter().map(|(u, _)| u.clone()).collect())
    }

    async fn record_login(&self, id: AdminUserId, at: DateTime<Utc>) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        let (user, _) = state
            .users
            .iter_mut()
            .find(|(u, _)| u.id == id)
            .ok_or(RepositoryError::NotFound)?;
        user.last_login = Some(at);
        Ok(())
    }

    async fn set_active(&self, id: AdminUserId, active: bool) -> Result<AdminUser, RepositoryError> {
        let mut state = self.lock();
        let (user, _) = state
            .users
            .iter_mut()
            .find(|(u, _)| u.id == id)
            .ok_or(RepositoryError::NotFound)?;
        user.is_active = active;
        Ok(user.clone())
    }

    async fn update_password_hash(
        &self,
        id: AdminUserId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        let (_, hash) = state
            .users
            .iter_mut()
            .find(|(u, _)| u.id == id)
            .ok_or(RepositoryError::NotFound)?;
        password_hash.clone_into(hash);
        Ok(())
    }

    async fn delete(&self, id: AdminUserId) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        let before = state.users.len();
        state.users.retain(|(u, _)| u.id != id);
        if state.users.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

impl GameStore for MemoryStore {
    async fn insert(&self, game: &NewGame) -> Result<Game, RepositoryError> {
        let mut state = self.lock();
        state.next_game_id += 1;
        let now = Utc::now();
        let stored = Game {
            id: GameId::new(state.next_game_id),
            sport: game.sport.clone(),
            league: game.league.clone(),
            team1: game.team1.clone(),
            team2: game.team2.clone(),
            score: game.score,
            date: game.date,
            created_at: now,
            updated_at: now,
        };
        state.games.push(stored.clone());
        Ok(stored)
    }

    async fn get(&self, id: GameId) -> Result<Option<Game>, RepositoryError> {
        Ok(self.lock().games.iter().find(|g| g.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Game>, RepositoryError> {
        let mut games = self.lock().games.clone();
        games.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(games)
    }

    async fn list_on_date(&self, date: NaiveDate) -> Result<Vec<Game>, RepositoryError> {
        Ok(self
            .lock()
            .games
            .iter()
            .filter(|g| g.date == date)
            .cloned()
            .collect())
    }

    async fn update(&self, id: GameId, game: &NewGame) -> Result<Game, RepositoryError> {
        let mut state = self.lock();
        let stored = state
            .games
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(RepositoryError::NotFound)?;
        stored.sport.clone_from(&game.sport);
        stored.league.clone_from(&game.league);
        stored.team1.clone_from(&game.team1);
        stored.team2.clone_from(&game.team2);
        stored.score = game.score;
        stored.date = game.date;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: GameId) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        let before = state.games.len();
        state.games.retain(|g| g.id != id);
        if state.games.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

/// Fixed "today" used by game tests.
#[must_use]
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap_or_default()
}

/// A game draft with the given fields.
#[must_use]
pub fn draft(sport: &str, league: &str, teams: (&str, &str), score: &str, date: &str) -> GameDraft {
    GameDraft {
        sport: sport.to_owned(),
        league: league.to_owned(),
        team1: teams.0.to_owned(),
        team2: teams.1.to_owned(),
        score: score.to_owned(),
        date: date.to_owned(),
    }
}
