use crate::{
    MAX_PLAYOFF_SEED, MAX_SEASON_GAMES, MIN_PLAYOFF_SEED, PlayoffResult, Position, PostSeason, PostSeasonKind,
    Season, SeasonError, required_text,
};

/// Partial update of a single season. Absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeasonPatch {
    pub wins: Option<i64>,
    pub losses: Option<i64>,
    pub college: Option<String>,
    pub position: Option<Position>,
    pub conf_champ: Option<bool>,
    pub post_season: Option<PostSeasonKind>,
    pub bowl_game: Option<String>,
    pub bowl_opponent: Option<String>,
    pub bowl_result: Option<bool>,
    pub playoff_seed: Option<i64>,
    pub playoff_result: Option<PlayoffResult>,
}

struct CheckedPatch {
    wins: Option<u32>,
    losses: Option<u32>,
    college: Option<String>,
    playoff_seed: Option<u8>,
}

fn game_count(field: &'static str, value: i64) -> Result<u32, SeasonError> {
    u32::try_from(value)
        .ok()
        .filter(|games| *games <= MAX_SEASON_GAMES)
        .ok_or_else(|| {
            SeasonError::invalid(
                field,
                format!("must be an integer between 0 and {}", MAX_SEASON_GAMES),
            )
        })
}

fn playoff_seed(value: i64) -> Result<u8, SeasonError> {
    u8::try_from(value)
        .ok()
        .filter(|seed| (MIN_PLAYOFF_SEED..=MAX_PLAYOFF_SEED).contains(seed))
        .ok_or_else(|| {
            SeasonError::invalid(
                "playoffSeed",
                format!(
                    "must be between {} and {}",
                    MIN_PLAYOFF_SEED, MAX_PLAYOFF_SEED
                ),
            )
        })
}

impl SeasonPatch {
    pub fn is_empty(&self) -> bool {
        *self == SeasonPatch::default()
    }

    fn check(&self) -> Result<CheckedPatch, SeasonError> {
        Ok(CheckedPatch {
            wins: self.wins.map(|w| game_count("wins", w)).transpose()?,
            losses: self.losses.map(|l| game_count("losses", l)).transpose()?,
            college: self
                .college
                .as_deref()
                .map(|c| required_text("college", c))
                .transpose()?,
            playoff_seed: self.playoff_seed.map(playoff_seed).transpose()?,
        })
    }

    /// Validates the whole patch, then applies it. On error the season is unchanged.
    ///
    /// A postseason change resets the branch being left before branch fields are
    /// written, and branch fields for a branch the season is not on are dropped.
    pub fn apply(&self, season: &mut Season) -> Result<(), SeasonError> {
        let checked = self.check()?;

        if let Some(wins) = checked.wins {
            season.wins = wins;
        }
        if let Some(losses) = checked.losses {
            season.losses = losses;
        }
        if let Some(college) = checked.college {
            season.college = college;
        }
        if let Some(position) = self.position {
            season.position = position;
        }
        if let Some(conf_champ) = self.conf_champ {
            season.conf_champ = conf_champ;
        }
        if let Some(kind) = self.post_season {
            season.post_season.switch_to(kind);
        }

        match &mut season.post_season {
            PostSeason::None => {}
            PostSeason::Bowl(bowl) => {
                if let Some(game) = &self.bowl_game {
                    bowl.game = game.trim().to_string();
                }
                if let Some(opponent) = &self.bowl_opponent {
                    bowl.opponent = opponent.trim().to_string();
                }
                if let Some(won) = self.bowl_result {
                    bowl.won = won;
                }
            }
            PostSeason::Playoff(playoff) => {
                if let Some(seed) = checked.playoff_seed {
                    playoff.seed = Some(seed);
                }
                if let Some(result) = self.playoff_result {
                    playoff.result = result;
                }
            }
        }
        Ok(())
    }
}
