//! Filtering and sorting of game lists.

use core::fmt;
use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::game::Game;

/// Sort order for game lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameSort {
    /// Most recent date first.
    #[default]
    Newest,
    /// Oldest date first.
    Oldest,
    /// Alphabetical by sport, newest first within a sport.
    Sport,
    /// Alphabetical by league, newest first within a league.
    League,
}

impl GameSort {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Sport => "sport",
            Self::League => "league",
        }
    }

    fn compare(self, a: &Game, b: &Game) -> Ordering {
        let newest = b.date.cmp(&a.date).then(b.id.cmp(&a.id));
        match self {
            Self::Newest => newest,
            Self::Oldest => a.date.cmp(&b.date).then(a.id.cmp(&b.id)),
            Self::Sport => a
                .sport
                .to_lowercase()
                .cmp(&b.sport.to_lowercase())
                .then(newest),
            Self::League => a
                .league
                .to_lowercase()
                .cmp(&b.league.to_lowercase())
                .then(newest),
        }
    }
}

impl fmt::Display for GameSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown sort key.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown sort order '{0}' (expected newest, oldest, sport or league)")]
pub struct UnknownSort(pub String);

impl FromStr for GameSort {
    type Err = UnknownSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" | "date_desc" => Ok(Self::Newest),
            "oldest" | "date_asc" => Ok(Self::Oldest),
            "sport" => Ok(Self::Sport),
            "league" => Ok(Self::League),
            _ => Err(UnknownSort(s.to_owned())),
        }
    }
}

/// A filter and sort over a list of games.
///
/// Empty filter values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameQuery {
    /// Exact sport match (case-insensitive).
    pub sport: Option<String>,
    /// Exact league match (case-insensitive).
    pub league: Option<String>,
    /// Substring of `"sport league team1 team2 score"` (case-insensitive).
    pub search: Option<String>,
    #[serde(default)]
    pub sort: GameSort,
}

impl GameQuery {
    /// Whether `game` passes every filter.
    #[must_use]
    pub fn matches(&self, game: &Game) -> bool {
        if let Some(sport) = non_empty(self.sport.as_deref())
            && !game.sport.eq_ignore_ascii_case(sport)
        {
            return false;
        }
        if let Some(league) = non_empty(self.league.as_deref())
            && !game.league.trim().eq_ignore_ascii_case(league)
        {
            return false;
        }
        if let Some(term) = non_empty(self.search.as_deref()) {
            let haystack = format!(
                "{} {} {} {} {}",
                game.sport, game.league, game.team1, game.team2, game.score
            )
            .to_lowercase();
            return haystack.contains(&term.to_lowercase());
        }
        true
    }

    /// Filter and sort `games`.
    #[must_use]
    pub fn apply(&self, games: Vec<Game>) -> Vec<Game> {
        let mut games: Vec<Game> = games.into_iter().filter(|g| self.matches(g)).collect();
        games.sort_by(|a, b| self.sort.compare(a, b));
        games
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::game::fixtures::{date, game};

    fn sample() -> Vec<Game> {
        let mut nba = game(3, "Basketball", "Lakers", "Celtics", (101, 99), date(2024, 2, 10));
        nba.league = "NBA".to_owned();
        vec![
            game(1, "Soccer", "Arsenal", "Chelsea", (2, 1), date(2024, 1, 5)),
            game(2, "Soccer", "Liverpool", "Everton", (0, 0), date(2024, 3, 1)),
            nba,
        ]
    }

    fn ids(games: &[Game]) -> Vec<i32> {
        games.iter().map(|g| g.id.as_i32()).collect()
    }

    #[test]
    fn test_default_is_newest_first() {
        let games = GameQuery::default().apply(sample());
        assert_eq!(ids(&games), vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_orders() {
        let query = |sort| GameQuery {
            sort,
            ..GameQuery::default()
        };
        assert_eq!(ids(&query(GameSort::Oldest).apply(sample())), vec![1, 3, 2]);
        assert_eq!(ids(&query(GameSort::Sport).apply(sample())), vec![3, 2, 1]);
        assert_eq!(ids(&query(GameSort::League).apply(sample())), vec![3, 2, 1]);
    }

    #[test]
    fn test_filter_by_sport_and_league() {
        let query = GameQuery {
            sport: Some("soccer".to_owned()),
            ..GameQuery::default()
        };
        assert_eq!(ids(&query.apply(sample())), vec![2, 1]);

        let query = GameQuery {
            league: Some("nba".to_owned()),
            ..GameQuery::default()
        };
        assert_eq!(ids(&query.apply(sample())), vec![3]);
    }

    #[test]
    fn test_search_spans_fields() {
        let query = |term: &str| GameQuery {
            search: Some(term.to_owned()),
            ..GameQuery::default()
        };
        assert_eq!(ids(&query("EVERTON").apply(sample())), vec![2]);
        assert_eq!(ids(&query("101-99").apply(sample())), vec![3]);
        assert_eq!(ids(&query("premier").apply(sample())), vec![2, 1]);
        assert!(query("cricket").apply(sample()).is_empty());
    }

    #[test]
    fn test_blank_filters_are_ignored() {
        let query = GameQuery {
            sport: Some("  ".to_owned()),
            search: Some(String::new()),
            ..GameQuery::default()
        };
        assert_eq!(query.apply(sample()).len(), 3);
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!("Oldest".parse::<GameSort>().unwrap(), GameSort::Oldest);
        assert_eq!("date_desc".parse::<GameSort>().unwrap(), GameSort::Newest);
        assert!("random".parse::<GameSort>().is_err());
    }
}
