//! Sport registry.
//!
//! Every sport the desk accepts has one row in [`SPORTS`]: its canonical name
//! and the inclusive range each side of a score must fall in. Sports are
//! looked up by name, case-insensitively. Unknown sports have no rule and
//! their scores cannot be validated.

use serde::Serialize;

use crate::types::{Score, ScoreError};

/// Score rule for one sport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SportRule {
    /// Canonical display name.
    pub name: &'static str,
    /// Lowest allowed value for either side.
    pub min: u32,
    /// Highest allowed value for either side.
    pub max: u32,
}

impl SportRule {
    /// Check both sides of `score` against this rule.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::OutOfRange`] naming the first side out of range.
    pub fn check(&self, score: Score) -> Result<Score, ScoreError> {
        for value in [score.team1(), score.team2()] {
            if !(self.min..=self.max).contains(&value) {
                return Err(ScoreError::OutOfRange {
                    sport: self.name,
                    min: self.min,
                    max: self.max,
                    value,
                });
            }
        }
        Ok(score)
    }
}

/// All registered sports.
pub const SPORTS: &[SportRule] = &[
    SportRule {
        name: "Soccer",
        min: 0,
        max: 15,
    },
    SportRule {
        name: "Basketball",
        min: 50,
        max: 200,
    },
    SportRule {
        name: "Tennis",
        min: 0,
        max: 7,
    },
    SportRule {
        name: "Volleyball",
        min: 0,
        max: 5,
    },
];

/// Leagues whose sport is well known, used for compatibility warnings.
const LEAGUE_SPORTS: &[(&str, &str)] = &[
    ("Premier League", "Soccer"),
    ("La Liga", "Soccer"),
    ("Serie A", "Soccer"),
    ("Bundesliga", "Soccer"),
    ("Champions League", "Soccer"),
    ("Europa League", "Soccer"),
    ("NBA", "Basketball"),
    ("EuroLeague", "Basketball"),
    ("WNBA", "Basketball"),
    ("College Basketball", "Basketball"),
];

/// Find the rule for `name` (trimmed, case-insensitive).
#[must_use]
pub fn lookup(name: &str) -> Option<&'static SportRule> {
    let name = name.trim();
    SPORTS.iter().find(|rule| rule.name.eq_ignore_ascii_case(name))
}

/// Validate a score string for a sport.
///
/// ```
/// use matchbook_core::sport::validate_score;
///
/// assert!(validate_score("Soccer", "2-1").is_ok());
/// assert!(validate_score("Basketball", "250-10").is_err());
/// ```
///
/// # Errors
///
/// - [`ScoreError::UnregisteredSport`] when the sport has no rule
/// - a format-class error when the string is not `"A-B"`
/// - [`ScoreError::OutOfRange`] or [`ScoreError::TooLarge`] when a side is out of range
pub fn validate_score(sport: &str, score: &str) -> Result<Score, ScoreError> {
    let rule = lookup(sport).ok_or_else(|| ScoreError::UnregisteredSport(sport.trim().to_owned()))?;
    rule.check(Score::parse(score)?)
}

fn find_league(league: &str) -> Option<&'static (&'static str, &'static str)> {
    let league = league.trim();
    LEAGUE_SPORTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(league))
}

/// The sport a league is known to belong to, if any.
#[must_use]
pub fn league_sport(league: &str) -> Option<&'static str> {
    find_league(league).map(|(_, sport)| *sport)
}

/// Registry spelling of a known league (`"nba"` gives `"NBA"`).
#[must_use]
pub fn canonical_league(league: &str) -> Option<&'static str> {
    find_league(league).map(|(name, _)| *name)
}

/// Known leagues for a sport, in registry order.
pub fn leagues_for(sport: &str) -> impl Iterator<Item = &'static str> + '_ {
    LEAGUE_SPORTS
        .iter()
        .filter(move |(_, s)| s.eq_ignore_ascii_case(sport.trim()))
        .map(|(league, _)| *league)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_soccer_valid() {
        assert_eq!(validate_score("Soccer", "2-1").unwrap(), Score::new(2, 1));
    }

    #[test]
    fn test_basketball_exceeds_range() {
        let err = validate_score("Basketball", "250-10").unwrap_err();
        assert!(err.is_range());
        assert_eq!(
            err,
            ScoreError::OutOfRange {
                sport: "Basketball",
                min: 50,
                max: 200,
                value: 250,
            }
        );
    }

    #[test]
    fn test_every_in_range_score_is_valid() {
        for rule in SPORTS {
            for a in rule.min..=rule.max {
                for b in [rule.min, rule.max] {
                    let score = format!("{a}-{b}");
                    assert!(
                        validate_score(rule.name, &score).is_ok(),
                        "{} should accept {score}",
                        rule.name
                    );
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_sides_are_invalid() {
        for rule in SPORTS {
            let above = format!("{}-{}", rule.max + 1, rule.min);
            assert!(validate_score(rule.name, &above).unwrap_err().is_range());

            let above_second = format!("{}-{}", rule.min, rule.max + 1);
            assert!(validate_score(rule.name, &above_second).unwrap_err().is_range());

            if rule.min > 0 {
                let below = format!("{}-{}", rule.min - 1, rule.min);
                assert!(validate_score(rule.name, &below).unwrap_err().is_range());
            }

            let negative = format!("-1-{}", rule.min);
            assert!(validate_score(rule.name, &negative).is_err());
        }
    }

    #[test]
    fn test_unregistered_sport() {
        assert_eq!(
            validate_score("Curling", "5-3"),
            Err(ScoreError::UnregisteredSport("Curling".to_owned()))
        );
    }

    #[test]
    fn test_unregistered_sport_checked_before_format() {
        assert!(matches!(
            validate_score("Curling", "garbage"),
            Err(ScoreError::UnregisteredSport(_))
        ));
    }

    #[test]
    fn test_malformed_score_is_format_error() {
        assert!(validate_score("Soccer", "two-one").unwrap_err().is_format());
        assert!(validate_score("Soccer", "21").unwrap_err().is_format());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup(" soccer ").map(|r| r.name), Some("Soccer"));
        assert!(lookup("Formula 1").is_none());
    }

    #[test]
    fn test_league_sport() {
        assert_eq!(league_sport("NBA"), Some("Basketball"));
        assert_eq!(league_sport("premier league"), Some("Soccer"));
        assert_eq!(league_sport("Sunday Pub League"), None);
        assert_eq!(leagues_for("Basketball").count(), 4);
    }

    #[test]
    fn test_canonical_league() {
        assert_eq!(canonical_league(" nba "), Some("NBA"));
        assert_eq!(canonical_league("LA LIGA"), Some("La Liga"));
        assert_eq!(canonical_league("Sunday Pub League"), None);
    }
}
