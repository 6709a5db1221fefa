mod career;
mod patch;
mod record;

use std::str::FromStr;

pub use career::{Career, RollbackOutcome};
pub use patch::SeasonPatch;
pub use record::{CareerRecord, PositionRecord, WinLoss};

pub const MIN_PLAYOFF_SEED: u8 = 1;
pub const MAX_PLAYOFF_SEED: u8 = 12;

/// Seeds up to and including this one skip the first playoff round.
pub const LAST_BYE_SEED: u8 = 4;

/// Upper bound for wins or losses in a single season.
pub const MAX_SEASON_GAMES: u32 = 99;

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    HeadCoach,
    OffensiveCoordinator,
    DefensiveCoordinator,
}

impl Position {
    pub const ALL: [Position; 3] = [
        Position::HeadCoach,
        Position::OffensiveCoordinator,
        Position::DefensiveCoordinator,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Position::HeadCoach => "HC",
            Position::OffensiveCoordinator => "OC",
            Position::DefensiveCoordinator => "DC",
        }
    }
}

impl FromStr for Position {
    type Err = SeasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HC" => Ok(Position::HeadCoach),
            "OC" => Ok(Position::OffensiveCoordinator),
            "DC" => Ok(Position::DefensiveCoordinator),
            _ => Err(SeasonError::invalid(
                "position",
                format!("unknown position '{}', expected HC, OC or DC", s),
            )),
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PlayoffResult {
    #[default]
    None,
    FirstRoundLoss,
    SecondRoundLoss,
    SemifinalLoss,
    ChampionshipLoss,
    Champion,
}

impl PlayoffResult {
    pub fn code(&self) -> &'static str {
        match self {
            PlayoffResult::None => "none",
            PlayoffResult::FirstRoundLoss => "first_round_loss",
            PlayoffResult::SecondRoundLoss => "second_round_loss",
            PlayoffResult::SemifinalLoss => "semifinal_loss",
            PlayoffResult::ChampionshipLoss => "championship_loss",
            PlayoffResult::Champion => "champion",
        }
    }
}

impl FromStr for PlayoffResult {
    type Err = SeasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "none" => Ok(PlayoffResult::None),
            "first_round_loss" => Ok(PlayoffResult::FirstRoundLoss),
            "second_round_loss" => Ok(PlayoffResult::SecondRoundLoss),
            "semifinal_loss" => Ok(PlayoffResult::SemifinalLoss),
            "championship_loss" => Ok(PlayoffResult::ChampionshipLoss),
            "champion" => Ok(PlayoffResult::Champion),
            _ => Err(SeasonError::invalid(
                "playoffResult",
                format!("unknown playoff result '{}'", s),
            )),
        }
    }
}

/// Which postseason branch a season is on, without the branch data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PostSeasonKind {
    None,
    Bowl,
    Playoff,
}

impl PostSeasonKind {
    pub fn code(&self) -> &'static str {
        match self {
            PostSeasonKind::None => "none",
            PostSeasonKind::Bowl => "bowl",
            PostSeasonKind::Playoff => "playoff",
        }
    }
}

impl FromStr for PostSeasonKind {
    type Err = SeasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "none" => Ok(PostSeasonKind::None),
            "bowl" => Ok(PostSeasonKind::Bowl),
            "playoff" => Ok(PostSeasonKind::Playoff),
            _ => Err(SeasonError::invalid(
                "postSeason",
                format!("unknown postseason '{}', expected none, bowl or playoff", s),
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct BowlOutcome {
    pub game: String,
    pub opponent: String,
    pub won: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PlayoffOutcome {
    pub seed: Option<u8>,
    pub result: PlayoffResult,
}

impl PlayoffOutcome {
    pub fn has_bye(&self) -> bool {
        self.seed.is_some_and(|seed| seed <= LAST_BYE_SEED)
    }

    /// Games won and lost over the playoff run.
    pub fn record(&self) -> WinLoss {
        let bye = self.has_bye();
        let (wins, losses) = match self.result {
            PlayoffResult::None => (0, 0),
            PlayoffResult::FirstRoundLoss => (0, 1),
            PlayoffResult::SecondRoundLoss => (if bye { 0 } else { 1 }, 1),
            PlayoffResult::SemifinalLoss => (if bye { 1 } else { 2 }, 1),
            PlayoffResult::ChampionshipLoss => (if bye { 2 } else { 3 }, 1),
            PlayoffResult::Champion => (if bye { 3 } else { 4 }, 0),
        };
        WinLoss::new(wins, losses)
    }
}

/// A season carries data for at most one postseason branch.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum PostSeason {
    #[default]
    None,
    Bowl(BowlOutcome),
    Playoff(PlayoffOutcome),
}

impl PostSeason {
    pub fn kind(&self) -> PostSeasonKind {
        match self {
            PostSeason::None => PostSeasonKind::None,
            PostSeason::Bowl(_) => PostSeasonKind::Bowl,
            PostSeason::Playoff(_) => PostSeasonKind::Playoff,
        }
    }

    /// Moves to the given branch. Staying on the current branch keeps its data,
    /// switching starts the new branch from its defaults.
    pub fn switch_to(&mut self, kind: PostSeasonKind) {
        if self.kind() == kind {
            return;
        }
        *self = match kind {
            PostSeasonKind::None => PostSeason::None,
            PostSeasonKind::Bowl => PostSeason::Bowl(BowlOutcome::default()),
            PostSeasonKind::Playoff => PostSeason::Playoff(PlayoffOutcome::default()),
        };
    }

    pub fn record(&self) -> WinLoss {
        match self {
            PostSeason::None => WinLoss::default(),
            PostSeason::Bowl(bowl) if bowl.won => WinLoss::new(1, 0),
            PostSeason::Bowl(_) => WinLoss::new(0, 1),
            PostSeason::Playoff(playoff) => playoff.record(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Season {
    pub year: i32,
    pub wins: u32,
    pub losses: u32,
    pub is_editable: bool,
    pub college: String,
    pub position: Position,
    pub conf_champ: bool,
    pub post_season: PostSeason,
}

impl Season {
    /// A fresh 0-0 season, open for editing.
    pub fn new(year: i32, college: String, position: Position) -> Self {
        Season {
            year,
            wins: 0,
            losses: 0,
            is_editable: true,
            college,
            position,
            conf_champ: false,
            post_season: PostSeason::None,
        }
    }

    pub fn record(&self) -> WinLoss {
        WinLoss::new(self.wins, self.losses)
    }

    pub fn is_national_champion(&self) -> bool {
        matches!(
            &self.post_season,
            PostSeason::Playoff(PlayoffOutcome {
                result: PlayoffResult::Champion,
                ..
            })
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeasonError {
    SeasonNotFound(i32),
    SeasonLocked(i32),
    DuplicateSeason(i32),
    InvalidInput { field: &'static str, message: String },
}

impl SeasonError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        SeasonError::InvalidInput {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SeasonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeasonError::SeasonNotFound(year) => write!(f, "No season found for {}", year),
            SeasonError::SeasonLocked(year) => write!(f, "Season {} is not editable", year),
            SeasonError::DuplicateSeason(year) => write!(f, "Season {} already exists", year),
            SeasonError::InvalidInput { field, message } => write!(f, "{}: {}", field, message),
        }
    }
}

/// Trims a required text field, rejecting it when nothing is left.
pub fn required_text(field: &'static str, value: &str) -> Result<String, SeasonError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SeasonError::invalid(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Rejects years outside `MIN_YEAR..=MAX_YEAR`.
pub fn checked_year(year: i32) -> Result<i32, SeasonError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(SeasonError::invalid(
            "currentYear",
            format!("must be between {} and {}", MIN_YEAR, MAX_YEAR),
        ))
    }
}

pub fn next_year(year: i32) -> Result<i32, SeasonError> {
    checked_year(year.saturating_add(1))
}

pub fn previous_year(year: i32) -> Result<i32, SeasonError> {
    checked_year(year.saturating_sub(1))
}

pub fn current_calendar_year() -> i32 {
    use chrono::Datelike;
    chrono::Utc::now().year()
}
