//! Final score of a game.
//!
//! Scores travel as text in the form `"A-B"`, where `A` belongs to the first
//! participant and `B` to the second. [`Score::parse`] only checks the shape;
//! per-sport ranges are enforced by [`crate::sport::validate_score`].

use core::fmt;
use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};

/// Why a score string was rejected.
///
/// The variants fall into three classes, see [`ScoreError::is_format`],
/// [`ScoreError::is_range`] and [`ScoreError::UnregisteredSport`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// Nothing was submitted.
    #[error("score cannot be empty")]
    Empty,

    /// Not exactly one `-` separating two sides.
    #[error("score must be in the form 'X-Y' (e.g. 2-1)")]
    MissingSeparator,

    /// A side is not a plain non-negative integer.
    #[error("score must contain only numbers")]
    NotNumeric,

    /// A side does not fit in a `u32`.
    #[error("score value is too large")]
    TooLarge,

    /// A side is outside the sport's inclusive range.
    #[error("{sport} scores must be between {min} and {max} per side (got {value})")]
    OutOfRange {
        /// Canonical sport name.
        sport: &'static str,
        /// Lowest allowed value per side.
        min: u32,
        /// Highest allowed value per side.
        max: u32,
        /// The offending side.
        value: u32,
    },

    /// The sport has no score rule.
    #[error("sport '{0}' is not registered")]
    UnregisteredSport(String),
}

impl ScoreError {
    /// Returns `true` for malformed input (empty, bad separator, non-numeric).
    #[must_use]
    pub const fn is_format(&self) -> bool {
        matches!(self, Self::Empty | Self::MissingSeparator | Self::NotNumeric)
    }

    /// Returns `true` when the input parsed but a side is out of bounds.
    #[must_use]
    pub const fn is_range(&self) -> bool {
        matches!(self, Self::TooLarge | Self::OutOfRange { .. })
    }
}

/// A parsed `"A-B"` score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Score {
    team1: u32,
    team2: u32,
}

impl Score {
    /// Create a score from its two sides.
    #[must_use]
    pub const fn new(team1: u32, team2: u32) -> Self {
        Self { team1, team2 }
    }

    /// Parse `"A-B"`. Whitespace around either side is ignored.
    ///
    /// A leading minus sign yields an extra separator, so negative sides are
    /// reported as [`ScoreError::MissingSeparator`].
    ///
    /// # Errors
    ///
    /// Returns a format-class [`ScoreError`] for malformed input, or
    /// [`ScoreError::TooLarge`] when a side overflows `u32`.
    pub fn parse(s: &str) -> Result<Self, ScoreError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ScoreError::Empty);
        }

        let mut parts = s.split('-');
        let (Some(first), Some(second), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ScoreError::MissingSeparator);
        };

        Ok(Self {
            team1: parse_side(first)?,
            team2: parse_side(second)?,
        })
    }

    /// Points scored by the first participant.
    #[must_use]
    pub const fn team1(&self) -> u32 {
        self.team1
    }

    /// Points scored by the second participant.
    #[must_use]
    pub const fn team2(&self) -> u32 {
        self.team2
    }

    /// Combined score of both sides.
    #[must_use]
    pub fn total(&self) -> u64 {
        u64::from(self.team1) + u64::from(self.team2)
    }

    /// The same score seen from the other participant.
    #[must_use]
    pub const fn swapped(&self) -> Self {
        Self {
            team1: self.team2,
            team2: self.team1,
        }
    }
}

fn parse_side(side: &str) -> Result<u32, ScoreError> {
    let side = side.trim();
    if side.is_empty() || !side.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ScoreError::NotNumeric);
    }

    side.parse::<u32>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => ScoreError::TooLarge,
        _ => ScoreError::NotNumeric,
    })
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.team1, self.team2)
    }
}

impl std::str::FromStr for Score {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Score {
    type Error = ScoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Score> for String {
    fn from(score: Score) -> Self {
        score.to_string()
    }
}
