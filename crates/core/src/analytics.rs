//! Summary statistics over stored games.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::game::{Game, Outcome, same_name};

/// How many leagues [`Summary::top_leagues`] keeps.
pub const TOP_LEAGUES: usize = 5;

/// Window for [`Summary::recent_games`].
pub const RECENT_DAYS: u64 = 30;

/// Game count for one sport or league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub name: String,
    pub games: usize,
}

/// Desk-wide statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_games: usize,
    /// Distinct participant names, compared case-insensitively.
    pub participants: usize,
    /// Mean of both sides combined per game, `0.0` with no games.
    pub average_total_score: f64,
    /// Share of games that ended with a winner, from `0.0` to `1.0`.
    pub decisive_rate: f64,
    /// Games dated within the last [`RECENT_DAYS`] days, or later.
    pub recent_games: usize,
    /// Every sport with at least one game, alphabetical.
    pub by_sport: Vec<Tally>,
    /// Busiest leagues, most games first, ties by name.
    pub top_leagues: Vec<Tally>,
    /// Games per `YYYY-MM` month, oldest first.
    pub by_month: Vec<Tally>,
}

impl Summary {
    /// The busiest league, if any game was recorded.
    #[must_use]
    pub fn top_league(&self) -> Option<&Tally> {
        self.top_leagues.first()
    }
}

/// Compute the desk summary. `today` anchors the recent-games window.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize(games: &[Game], today: NaiveDate) -> Summary {
    let participants: BTreeSet<String> = games
        .iter()
        .flat_map(|g| [&g.team1, &g.team2])
        .map(|name| name.trim().to_lowercase())
        .collect();

    let (average_total_score, decisive_rate) = if games.is_empty() {
        (0.0, 0.0)
    } else {
        let combined: u64 = games.iter().map(|g| g.score.total()).sum();
        let decisive = games
            .iter()
            .filter(|g| Outcome::of(g.score) != Outcome::Draw)
            .count();
        let n = games.len() as f64;
        (combined as f64 / n, decisive as f64 / n)
    };

    let recent_games = today
        .checked_sub_days(Days::new(RECENT_DAYS))
        .map_or(games.len(), |cutoff| {
            games.iter().filter(|g| g.date > cutoff).count()
        });

    let by_sport = tally(games.iter().map(|g| g.sport.as_str()));

    let mut top_leagues = tally(games.iter().map(|g| g.league.as_str()));
    top_leagues.sort_by(|a, b| b.games.cmp(&a.games).then_with(|| a.name.cmp(&b.name)));
    top_leagues.truncate(TOP_LEAGUES);

    let months: Vec<String> = games
        .iter()
        .map(|g| g.date.format("%Y-%m").to_string())
        .collect();
    let by_month = tally(months.iter().map(String::as_str));

    Summary {
        total_games: games.len(),
        participants: participants.len(),
        average_total_score,
        decisive_rate,
        recent_games,
        by_sport,
        top_leagues,
        by_month,
    }
}

/// Count names case-insensitively, sorted by folded name. Each tally keeps
/// the first spelling seen.
fn tally<'a>(names: impl Iterator<Item = &'a str>) -> Vec<Tally> {
    let mut counts: BTreeMap<String, Tally> = BTreeMap::new();
    for name in names {
        let name = name.trim();
        counts
            .entry(name.to_lowercase())
            .or_insert_with(|| Tally {
                name: name.to_owned(),
                games: 0,
            })
            .games += 1;
    }
    counts.into_values().collect()
}

/// Record between two participants, seen from `team_a`'s side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadToHead {
    pub team_a: String,
    pub team_b: String,
    pub games: usize,
    pub wins_a: usize,
    pub wins_b: usize,
    pub draws: usize,
    pub points_a: u64,
    pub points_b: u64,
}

/// Compare two participants across every game they played each other.
///
/// Either participant may be listed first in a stored game.
#[must_use]
pub fn head_to_head(games: &[Game], team_a: &str, team_b: &str) -> HeadToHead {
    let mut record = HeadToHead {
        team_a: team_a.trim().to_owned(),
        team_b: team_b.trim().to_owned(),
        games: 0,
        wins_a: 0,
        wins_b: 0,
        draws: 0,
        points_a: 0,
        points_b: 0,
    };

    for game in games {
        let score = if same_name(&game.team1, team_a) && same_name(&game.team2, team_b) {
            game.score
        } else if same_name(&game.team1, team_b) && same_name(&game.team2, team_a) {
            game.score.swapped()
        } else {
            continue;
        };

        record.games += 1;
        record.points_a += u64::from(score.team1());
        record.points_b += u64::from(score.team2());
        match Outcome::of(score) {
            Outcome::Team1Win => record.wins_a += 1,
            Outcome::Team2Win => record.wins_b += 1,
            Outcome::Draw => record.draws += 1,
        }
    }

    record
}
