//! Duplicate game detection.
//!
//! Two games are the same fixture when they share a date and the same pair of
//! participants, in either order. The sport and league are not compared, and
//! neither is the score: re-entering a result with a corrected score is still
//! a duplicate of the original entry.

use chrono::NaiveDate;

use crate::game::{Game, same_name};
use crate::types::GameId;

/// The identifying part of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixture<'a> {
    pub team1: &'a str,
    pub team2: &'a str,
    pub date: NaiveDate,
}

impl Fixture<'_> {
    /// Symmetric in team order.
    #[must_use]
    pub fn matches(&self, other: &Fixture<'_>) -> bool {
        if self.date != other.date {
            return false;
        }
        (same_name(self.team1, other.team1) && same_name(self.team2, other.team2))
            || (same_name(self.team1, other.team2) && same_name(self.team2, other.team1))
    }
}

impl Game {
    /// This game's fixture.
    #[must_use]
    pub fn fixture(&self) -> Fixture<'_> {
        Fixture {
            team1: &self.team1,
            team2: &self.team2,
            date: self.date,
        }
    }
}

/// Result of a duplicate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateStatus {
    Unique,
    /// An existing game with the same fixture.
    Duplicate(GameId),
}

impl DuplicateStatus {
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

/// Check `candidate` against `existing`.
///
/// `editing` names the record being edited, which is never compared with
/// itself.
#[must_use]
pub fn check(candidate: &Fixture<'_>, existing: &[Game], editing: Option<GameId>) -> DuplicateStatus {
    existing
        .iter()
        .filter(|game| Some(game.id) != editing)
        .find(|game| candidate.matches(&game.fixture()))
        .map_or(DuplicateStatus::Unique, |game| DuplicateStatus::Duplicate(game.id))
}
