//! Game form validation.
//!
//! [`validate_game`] turns a [`GameDraft`] into a [`NewGame`] or a
//! [`ValidationReport`]. Every finding is a [`ValidationIssue`] classified by
//! [`IssueKind`] and [`Severity`]; only [`Severity::Error`] blocks a save.
//! Warnings and informational notices ride along with the accepted game.

use core::fmt;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::duplicate::{self, DuplicateStatus};
use crate::game::{Game, GameDraft, NewGame, same_name};
use crate::sport;
use crate::types::{GameId, ScoreError};

/// Shortest accepted participant name.
pub const MIN_PARTICIPANT_LENGTH: usize = 2;
/// Longest accepted participant name.
pub const MAX_PARTICIPANT_LENGTH: usize = 50;
/// Shortest accepted league name.
pub const MIN_LEAGUE_LENGTH: usize = 2;
/// Longest accepted league name.
pub const MAX_LEAGUE_LENGTH: usize = 100;
/// How far back a game may be dated (20 years).
pub const MAX_PAST_DAYS: u64 = 365 * 20;
/// How far ahead a game may be scheduled (2 years).
pub const MAX_FUTURE_DAYS: u64 = 365 * 2;

const FORBIDDEN_NAME_CHARS: &[char] = &['<', '>', ';', '{', '}'];

/// How serious an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Which input an issue concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Sport,
    League,
    Team1,
    Team2,
    Score,
    Date,
    /// The record as a whole.
    General,
}

impl Field {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sport => "sport",
            Self::League => "league",
            Self::Team1 => "team1",
            Self::Team2 => "team2",
            Self::Score => "score",
            Self::Date => "date",
            Self::General => "general",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A required field is empty.
    Missing,
    /// Input is malformed (score shape, date format).
    Format,
    /// A value is outside its allowed range (score side, date window).
    Range,
    /// The sport has no score rule.
    UnregisteredSport,
    /// A game with the same fixture already exists.
    Duplicate,
    /// A name is too short or too long.
    Length,
    /// A name contains forbidden characters.
    InvalidCharacters,
    /// Both participants are the same.
    SameParticipant,
    /// The league is known to belong to another sport.
    LeagueMismatch,
    /// The game is dated in the future.
    Scheduled,
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: Field,
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
}

impl ValidationIssue {
    fn error(field: Field, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn warning(field: Field, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    fn info(field: Field, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            severity: Severity::Info,
            message: message.into(),
        }
    }

    /// Whether this issue blocks a save.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Classify a score rejection against the score field.
    #[must_use]
    pub fn from_score_error(err: &ScoreError) -> Self {
        let (field, kind) = match err {
            ScoreError::UnregisteredSport(_) => (Field::Sport, IssueKind::UnregisteredSport),
            e if e.is_range() => (Field::Score, IssueKind::Range),
            _ => (Field::Score, IssueKind::Format),
        };
        Self::error(field, kind, err.to_string())
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A rejected submission: at least one blocking issue, plus any notices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// All issues in the order they were found.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Only the blocking issues.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.is_blocking())
    }

    /// Whether any issue has the given kind.
    #[must_use]
    pub fn has_kind(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|i| i.kind == kind)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationReport {}

/// Inputs to validation that do not come from the form.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext {
    /// The operator's current date.
    pub today: NaiveDate,
    /// The record being edited, if any.
    pub editing: Option<GameId>,
}

impl ValidationContext {
    /// Context for a brand new game.
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self {
            today,
            editing: None,
        }
    }

    /// Context for editing an existing game.
    #[must_use]
    pub const fn editing(today: NaiveDate, id: GameId) -> Self {
        Self {
            today,
            editing: Some(id),
        }
    }
}

/// An accepted submission and the non-blocking notices raised on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checked {
    pub game: NewGame,
    pub notices: Vec<ValidationIssue>,
}

/// Validate a participant name, returning the trimmed name.
///
/// # Errors
///
/// Returns a blocking issue on `field` for empty, short, long, or unsafe names.
pub fn validate_participant(name: &str, field: Field) -> Result<String, ValidationIssue> {
    let name = name.trim();
    let len = name.chars().count();

    if len == 0 {
        return Err(ValidationIssue::error(
            field,
            IssueKind::Missing,
            "participant name cannot be empty",
        ));
    }
    if len < MIN_PARTICIPANT_LENGTH {
        return Err(ValidationIssue::error(
            field,
            IssueKind::Length,
            format!("name must be at least {MIN_PARTICIPANT_LENGTH} characters"),
        ));
    }
    if len > MAX_PARTICIPANT_LENGTH {
        return Err(ValidationIssue::error(
            field,
            IssueKind::Length,
            format!("name cannot exceed {MAX_PARTICIPANT_LENGTH} characters"),
        ));
    }
    if name.contains(FORBIDDEN_NAME_CHARS) {
        return Err(ValidationIssue::error(
            field,
            IssueKind::InvalidCharacters,
            "name contains invalid characters",
        ));
    }

    Ok(name.to_owned())
}

/// Validate a league name, returning the trimmed name.
///
/// A known league comes back in its registry spelling.
///
/// # Errors
///
/// Returns a blocking issue for empty, short, or long names.
pub fn validate_league(league: &str) -> Result<String, ValidationIssue> {
    let league = league.trim();
    let len = league.chars().count();

    if len == 0 {
        return Err(ValidationIssue::error(
            Field::League,
            IssueKind::Missing,
            "league name cannot be empty",
        ));
    }
    if len < MIN_LEAGUE_LENGTH {
        return Err(ValidationIssue::error(
            Field::League,
            IssueKind::Length,
            format!("league name must be at least {MIN_LEAGUE_LENGTH} characters"),
        ));
    }
    if len > MAX_LEAGUE_LENGTH {
        return Err(ValidationIssue::error(
            Field::League,
            IssueKind::Length,
            format!("league name cannot exceed {MAX_LEAGUE_LENGTH} characters"),
        ));
    }

    Ok(sport::canonical_league(league).map_or_else(|| league.to_owned(), str::to_owned))
}

/// Validate a `YYYY-MM-DD` date against the accepted window around `today`.
///
/// A future date is accepted with an informational notice.
///
/// # Errors
///
/// Returns a blocking format or range issue.
pub fn validate_date(
    date: &str,
    today: NaiveDate,
) -> Result<(NaiveDate, Option<ValidationIssue>), ValidationIssue> {
    let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationIssue::error(
            Field::Date,
            IssueKind::Format,
            "invalid date format, use YYYY-MM-DD",
        )
    })?;

    let earliest = today.checked_sub_days(Days::new(MAX_PAST_DAYS));
    if earliest.is_some_and(|earliest| parsed < earliest) {
        return Err(ValidationIssue::error(
            Field::Date,
            IssueKind::Range,
            "date cannot be more than 20 years ago",
        ));
    }

    let latest = today.checked_add_days(Days::new(MAX_FUTURE_DAYS));
    if latest.is_some_and(|latest| parsed > latest) {
        return Err(ValidationIssue::error(
            Field::Date,
            IssueKind::Range,
            "date cannot be more than 2 years in the future",
        ));
    }

    let notice = (parsed > today).then(|| {
        ValidationIssue::info(
            Field::Date,
            IssueKind::Scheduled,
            "future date detected (scheduled game)",
        )
    });

    Ok((parsed, notice))
}

/// Warn when a known league is paired with a different sport.
#[must_use]
pub fn check_league_sport(league: &str, sport: &str) -> Option<ValidationIssue> {
    let expected = sport::league_sport(league)?;
    if expected.eq_ignore_ascii_case(sport.trim()) {
        return None;
    }
    Some(ValidationIssue::warning(
        Field::League,
        IssueKind::LeagueMismatch,
        format!(
            "'{}' is typically a {expected} league, not {}",
            league.trim(),
            sport.trim()
        ),
    ))
}

/// Validate a full game submission.
///
/// `existing` should hold at least every stored game on the submitted date;
/// it is only used for the duplicate check.
///
/// # Errors
///
/// Returns a [`ValidationReport`] when any blocking issue was found. The
/// report also carries the non-blocking notices found along the way.
pub fn validate_game(
    draft: &GameDraft,
    existing: &[Game],
    ctx: &ValidationContext,
) -> Result<Checked, ValidationReport> {
    let required = [
        (Field::Sport, &draft.sport),
        (Field::League, &draft.league),
        (Field::Team1, &draft.team1),
        (Field::Team2, &draft.team2),
        (Field::Score, &draft.score),
        (Field::Date, &draft.date),
    ];
    let missing: Vec<ValidationIssue> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| {
            ValidationIssue::error(*field, IssueKind::Missing, format!("{field} is required"))
        })
        .collect();
    if !missing.is_empty() {
        return Err(ValidationReport { issues: missing });
    }

    let mut issues = Vec::new();

    let team1 = validate_participant(&draft.team1, Field::Team1)
        .map_err(|issue| issues.push(issue))
        .ok();
    let team2 = validate_participant(&draft.team2, Field::Team2)
        .map_err(|issue| issues.push(issue))
        .ok();
    let league = validate_league(&draft.league)
        .map_err(|issue| issues.push(issue))
        .ok();
    let date = match validate_date(&draft.date, ctx.today) {
        Ok((date, notice)) => {
            issues.extend(notice);
            Some(date)
        }
        Err(issue) => {
            issues.push(issue);
            None
        }
    };
    let score = sport::validate_score(&draft.sport, &draft.score)
        .map_err(|err| issues.push(ValidationIssue::from_score_error(&err)))
        .ok();

    if let (Some(team1), Some(team2)) = (&team1, &team2)
        && same_name(team1, team2)
    {
        issues.push(ValidationIssue::error(
            Field::Team2,
            IssueKind::SameParticipant,
            "participant 1 and 2 cannot be the same",
        ));
    }

    issues.extend(check_league_sport(&draft.league, &draft.sport));

    if let (Some(team1), Some(team2), Some(date)) = (&team1, &team2, date) {
        let fixture = duplicate::Fixture {
            team1,
            team2,
            date,
        };
        if let DuplicateStatus::Duplicate(id) = duplicate::check(&fixture, existing, ctx.editing) {
            issues.push(ValidationIssue::error(
                Field::General,
                IssueKind::Duplicate,
                format!("this match record already exists (game #{id})"),
            ));
        }
    }

    if issues.iter().any(ValidationIssue::is_blocking) {
        return Err(ValidationReport { issues });
    }

    // Every blocking path above pushed an issue, so all parts are present here.
    match (team1, team2, league, date, score, sport::lookup(&draft.sport)) {
        (Some(team1), Some(team2), Some(league), Some(date), Some(score), Some(rule)) => {
            Ok(Checked {
                game: NewGame {
                    sport: rule.name.to_owned(),
                    league,
                    team1,
                    team2,
                    score,
                    date,
                },
                notices: issues,
            })
        }
        _ => Err(ValidationReport { issues }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::game::fixtures::{date, game};
    use crate::types::Score;

    fn today() -> NaiveDate {
        date(2025, 6, 15)
    }

    fn draft(sport: &str, score: &str) -> GameDraft {
        GameDraft {
            sport: sport.to_owned(),
            league: "Premier League".to_owned(),
            team1: "Arsenal".to_owned(),
            team2: "Chelsea".to_owned(),
            score: score.to_owned(),
            date: "2025-06-01".to_owned(),
        }
    }

    #[test]
    fn test_valid_game_is_accepted() {
        let checked = validate_game(&draft("Soccer", "2-1"), &[], &ValidationContext::new(today()))
            .unwrap();
        assert_eq!(checked.game.score, Score::new(2, 1));
        assert_eq!(checked.game.date, date(2025, 6, 1));
        assert!(checked.notices.is_empty());
    }

    #[test]
    fn test_sport_is_canonicalized_and_names_trimmed() {
        let mut input = draft(" soccer ", "2-1");
        input.team1 = "  Arsenal ".to_owned();
        let checked = validate_game(&input, &[], &ValidationContext::new(today())).unwrap();
        assert_eq!(checked.game.sport, "Soccer");
        assert_eq!(checked.game.team1, "Arsenal");
    }

    #[test]
    fn test_missing_fields_short_circuit() {
        let input = GameDraft {
            sport: "Soccer".to_owned(),
            ..GameDraft::default()
        };
        let report = validate_game(&input, &[], &ValidationContext::new(today())).unwrap_err();
        assert_eq!(report.issues().len(), 5);
        assert!(report.issues().iter().all(|i| i.kind == IssueKind::Missing));
    }

    #[test]
    fn test_score_classification() {
        let ctx = ValidationContext::new(today());

        let report = validate_game(&draft("Soccer", "20-1"), &[], &ctx).unwrap_err();
        assert!(report.has_kind(IssueKind::Range));

        let report = validate_game(&draft("Soccer", "2:1"), &[], &ctx).unwrap_err();
        assert!(report.has_kind(IssueKind::Format));

        let mut input = draft("Curling", "5-3");
        input.league = "Scottish Curling Tour".to_owned();
        let report = validate_game(&input, &[], &ctx).unwrap_err();
        assert!(report.has_kind(IssueKind::UnregisteredSport));
    }

    #[test]
    fn test_same_participant() {
        let mut input = draft("Soccer", "1-1");
        input.team2 = "arsenal".to_owned();
        let report = validate_game(&input, &[], &ValidationContext::new(today())).unwrap_err();
        assert!(report.has_kind(IssueKind::SameParticipant));
    }

    #[test]
    fn test_participant_rules() {
        assert_eq!(validate_participant(" Arsenal ", Field::Team1).unwrap(), "Arsenal");
        assert_eq!(
            validate_participant("A", Field::Team1).unwrap_err().kind,
            IssueKind::Length
        );
        assert_eq!(
            validate_participant(&"x".repeat(51), Field::Team1).unwrap_err().kind,
            IssueKind::Length
        );
        assert_eq!(
            validate_participant("Robert'); DROP", Field::Team2).unwrap_err().kind,
            IssueKind::InvalidCharacters
        );
    }

    #[test]
    fn test_league_rules() {
        assert_eq!(validate_league("NBA").unwrap(), "NBA");
        assert_eq!(validate_league("  nba ").unwrap(), "NBA");
        assert_eq!(validate_league("Sunday pub league").unwrap(), "Sunday pub league");
        assert_eq!(validate_league("X").unwrap_err().kind, IssueKind::Length);
        assert_eq!(
            validate_league(&"L".repeat(101)).unwrap_err().kind,
            IssueKind::Length
        );
    }

    #[test]
    fn test_date_window() {
        let (parsed, notice) = validate_date("2025-06-15", today()).unwrap();
        assert_eq!(parsed, today());
        assert!(notice.is_none());

        let (_, notice) = validate_date("2025-12-25", today()).unwrap();
        assert_eq!(notice.map(|n| n.kind), Some(IssueKind::Scheduled));

        assert_eq!(
            validate_date("15/06/2025", today()).unwrap_err().kind,
            IssueKind::Format
        );
        assert_eq!(
            validate_date("1990-01-01", today()).unwrap_err().kind,
            IssueKind::Range
        );
        assert_eq!(
            validate_date("2030-01-01", today()).unwrap_err().kind,
            IssueKind::Range
        );
    }

    #[test]
    fn test_date_window_edges() {
        let days_back = |n| (today() - Days::new(n)).to_string();
        let days_ahead = |n| (today() + Days::new(n)).to_string();

        assert_eq!(days_back(MAX_PAST_DAYS), "2005-06-20");
        assert!(validate_date(&days_back(MAX_PAST_DAYS), today()).is_ok());
        assert_eq!(
            validate_date(&days_back(MAX_PAST_DAYS + 1), today()).unwrap_err().kind,
            IssueKind::Range
        );

        assert_eq!(days_ahead(MAX_FUTURE_DAYS), "2027-06-15");
        assert!(validate_date(&days_ahead(MAX_FUTURE_DAYS), today()).is_ok());
        assert_eq!(
            validate_date(&days_ahead(MAX_FUTURE_DAYS + 1), today()).unwrap_err().kind,
            IssueKind::Range
        );
    }

    #[test]
    fn test_future_game_is_accepted_with_notice() {
        let mut input = draft("Soccer", "0-0");
        input.date = "2025-08-01".to_owned();
        let checked = validate_game(&input, &[], &ValidationContext::new(today())).unwrap();
        assert_eq!(checked.notices.len(), 1);
        assert_eq!(checked.notices[0].severity, Severity::Info);
    }

    #[test]
    fn test_league_mismatch_is_warning_only() {
        let mut input = draft("Basketball", "101-99");
        input.league = "Premier League".to_owned();
        let checked = validate_game(&input, &[], &ValidationContext::new(today())).unwrap();
        assert_eq!(checked.notices.len(), 1);
        assert_eq!(checked.notices[0].kind, IssueKind::LeagueMismatch);
        assert_eq!(checked.notices[0].severity, Severity::Warning);
    }

    #[test]
    fn test_duplicate_blocks_save() {
        let existing = [game(3, "Soccer", "Chelsea", "Arsenal", (0, 1), date(2025, 6, 1))];
        let report = validate_game(&draft("Soccer", "2-1"), &existing, &ValidationContext::new(today()))
            .unwrap_err();
        assert!(report.has_kind(IssueKind::Duplicate));
        assert!(report.to_string().contains("already exists"));
    }

    #[test]
    fn test_editing_does_not_flag_itself() {
        let existing = [game(3, "Soccer", "Arsenal", "Chelsea", (2, 1), date(2025, 6, 1))];
        let ctx = ValidationContext::editing(today(), GameId::new(3));
        assert!(validate_game(&draft("Soccer", "3-1"), &existing, &ctx).is_ok());
    }

    #[test]
    fn test_all_errors_are_reported_together() {
        let input = GameDraft {
            sport: "Soccer".to_owned(),
            league: "P".to_owned(),
            team1: "A".to_owned(),
            team2: "Chelsea".to_owned(),
            score: "99-0".to_owned(),
            date: "not a date".to_owned(),
        };
        let report = validate_game(&input, &[], &ValidationContext::new(today())).unwrap_err();
        assert_eq!(report.errors().count(), 4);
    }
}
