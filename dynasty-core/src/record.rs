use std::ops::{Add, AddAssign};

use crate::{Position, Season};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct WinLoss {
    pub wins: u32,
    pub losses: u32,
}

impl WinLoss {
    pub fn new(wins: u32, losses: u32) -> Self {
        WinLoss { wins, losses }
    }

    pub fn games(&self) -> u64 {
        u64::from(self.wins) + u64::from(self.losses)
    }

    /// Share of games won in percent, rounded to one decimal. Zero without games.
    pub fn win_percentage(&self) -> f64 {
        let games = self.games();
        if games == 0 {
            return 0.0;
        }
        let pct = self.wins as f64 / games as f64 * 100.0;
        (pct * 10.0).round() / 10.0
    }
}

impl Add for WinLoss {
    type Output = WinLoss;

    fn add(self, rhs: WinLoss) -> WinLoss {
        WinLoss::new(
            self.wins.saturating_add(rhs.wins),
            self.losses.saturating_add(rhs.losses),
        )
    }
}

impl AddAssign for WinLoss {
    fn add_assign(&mut self, rhs: WinLoss) {
        *self = *self + rhs;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionRecord {
    pub position: Position,
    pub record: WinLoss,
}

/// Aggregates computed from a season list. Never stored.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CareerRecord {
    pub career: WinLoss,
    pub postseason: WinLoss,
    pub by_position: Vec<PositionRecord>,
    pub conf_championships: u32,
    pub national_championships: u32,
}

impl CareerRecord {
    pub fn from_seasons(seasons: &[Season]) -> Self {
        let mut record = CareerRecord {
            by_position: Position::ALL
                .iter()
                .map(|&position| PositionRecord {
                    position,
                    record: WinLoss::default(),
                })
                .collect(),
            ..Default::default()
        };

        for season in seasons {
            record.career += season.record();
            record.postseason += season.post_season.record();
            if let Some(split) = record
                .by_position
                .iter_mut()
                .find(|p| p.position == season.position)
            {
                split.record += season.record();
            }
            if season.conf_champ {
                record.conf_championships += 1;
            }
            if season.is_national_champion() {
                record.national_championships += 1;
            }
        }
        record
    }

    pub fn position(&self, position: Position) -> WinLoss {
        self.by_position
            .iter()
            .find(|p| p.position == position)
            .map(|p| p.record)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use crate::{BowlOutcome, PlayoffOutcome, PlayoffResult, PostSeason};

    use super::*;

    fn season(year: i32, wins: u32, losses: u32, position: Position) -> Season {
        let mut season = Season::new(year, "Georgia".to_string(), position);
        season.wins = wins;
        season.losses = losses;
        season
    }

    #[test]
    fn test_win_percentage() {
        assert_eq!(WinLoss::default().win_percentage(), 0.0);
        assert_eq!(WinLoss::new(2, 1).win_percentage(), 66.7);
        assert_eq!(WinLoss::new(12, 0).win_percentage(), 100.0);
        assert_eq!(WinLoss::new(0, 4).win_percentage(), 0.0);
        assert_eq!(WinLoss::new(1, 7).win_percentage(), 12.5);
    }

    #[test]
    fn test_oversized_stored_totals_saturate() {
        let seasons = [
            season(2024, u32::MAX, 1, Position::HeadCoach),
            season(2025, 5, u32::MAX, Position::HeadCoach),
        ];
        let record = CareerRecord::from_seasons(&seasons);
        assert_eq!(record.career, WinLoss::new(u32::MAX, u32::MAX));
        assert_eq!(record.career.games(), 2 * u32::MAX as u64);
        assert_eq!(record.career.win_percentage(), 50.0);
    }

    #[test]
    fn test_career_sums_and_splits() {
        let mut title_year = season(2026, 13, 1, Position::HeadCoach);
        title_year.conf_champ = true;
        title_year.post_season = PostSeason::Playoff(PlayoffOutcome {
            seed: Some(2),
            result: PlayoffResult::Champion,
        });
        let mut bowl_year = season(2025, 8, 4, Position::OffensiveCoordinator);
        bowl_year.post_season = PostSeason::Bowl(BowlOutcome {
            game: "Citrus Bowl".to_string(),
            opponent: "Iowa".to_string(),
            won: false,
        });
        let seasons = vec![
            season(2024, 6, 6, Position::OffensiveCoordinator),
            bowl_year,
            title_year,
        ];

        let record = CareerRecord::from_seasons(&seasons);
        assert_eq!(record.career, WinLoss::new(27, 11));
        assert_eq!(record.career.win_percentage(), 71.1);
        assert_eq!(record.postseason, WinLoss::new(3, 1));
        assert_eq!(record.position(Position::HeadCoach), WinLoss::new(13, 1));
        assert_eq!(
            record.position(Position::OffensiveCoordinator),
            WinLoss::new(14, 10)
        );
        assert_eq!(
            record.position(Position::DefensiveCoordinator),
            WinLoss::default()
        );
        assert_eq!(record.conf_championships, 1);
        assert_eq!(record.national_championships, 1);

        let mut reversed = seasons.clone();
        reversed.reverse();
        assert_eq!(CareerRecord::from_seasons(&reversed), record);
        assert_eq!(CareerRecord::from_seasons(&seasons), record);
    }

    #[test]
    fn test_empty_career() {
        let record = CareerRecord::from_seasons(&[]);
        assert_eq!(record.career, WinLoss::default());
        assert_eq!(record.by_position.len(), 3);
        assert_eq!(record.national_championships, 0);
    }
}
