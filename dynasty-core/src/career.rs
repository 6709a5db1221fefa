use crate::{
    CareerRecord, Position, Season, SeasonError, SeasonPatch, checked_year, next_year,
    previous_year, required_text,
};

/// One coach's season history together with the year clock it follows.
///
/// Seasons are kept sorted by ascending year with at most one season per year.
/// The displayed college/position mirror the latest season.
#[derive(Clone, Debug, PartialEq)]
pub struct Career {
    current_year: i32,
    college: String,
    position: Position,
    seasons: Vec<Season>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollbackOutcome {
    RolledBack,
    /// The career only had one season, nothing was changed.
    WouldBeEmpty,
}

impl Career {
    pub fn start(year: i32, college: &str, position: Position) -> Result<Self, SeasonError> {
        let year = checked_year(year)?;
        let college = required_text("college", college)?;
        Ok(Career {
            current_year: year,
            seasons: vec![Season::new(year, college.clone(), position)],
            college,
            position,
        })
    }

    /// Rebuilds a career from stored parts.
    pub fn from_parts(
        current_year: i32,
        college: String,
        position: Position,
        mut seasons: Vec<Season>,
    ) -> Result<Self, SeasonError> {
        seasons.sort_by_key(|s| s.year);
        if let Some(pair) = seasons.windows(2).find(|w| w[0].year == w[1].year) {
            return Err(SeasonError::DuplicateSeason(pair[0].year));
        }
        Ok(Career {
            current_year,
            college,
            position,
            seasons,
        })
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    pub fn college(&self) -> &str {
        &self.college
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    pub fn season(&self, year: i32) -> Option<&Season> {
        self.seasons.iter().find(|s| s.year == year)
    }

    pub fn latest_season(&self) -> Option<&Season> {
        self.seasons.last()
    }

    pub fn record(&self) -> CareerRecord {
        CareerRecord::from_seasons(&self.seasons)
    }

    fn season_mut(&mut self, year: i32) -> Result<&mut Season, SeasonError> {
        self.seasons
            .iter_mut()
            .find(|s| s.year == year)
            .ok_or(SeasonError::SeasonNotFound(year))
    }

    fn sync_display(&mut self) {
        if let Some(latest) = self.seasons.last() {
            self.college = latest.college.clone();
            self.position = latest.position;
        }
    }

    pub fn update_season(&mut self, year: i32, patch: &SeasonPatch) -> Result<(), SeasonError> {
        let season = self.season_mut(year)?;
        if !season.is_editable {
            return Err(SeasonError::SeasonLocked(year));
        }
        patch.apply(season)?;
        self.sync_display();
        Ok(())
    }

    /// Flips the lock on a season and returns whether it is now editable.
    pub fn toggle_editable(&mut self, year: i32) -> Result<bool, SeasonError> {
        let season = self.season_mut(year)?;
        season.is_editable = !season.is_editable;
        Ok(season.is_editable)
    }

    /// Changes the displayed college/position and writes them through to the
    /// current season, which must be editable.
    pub fn update_profile(
        &mut self,
        college: Option<&str>,
        position: Option<Position>,
    ) -> Result<(), SeasonError> {
        if college.is_none() && position.is_none() {
            return Ok(());
        }
        let patch = SeasonPatch {
            college: college.map(str::to_string),
            position,
            ..Default::default()
        };
        let current_year = self.current_year;
        if self.seasons.iter().any(|s| s.year == current_year) {
            return self.update_season(current_year, &patch);
        }
        if let Some(college) = college {
            self.college = required_text("college", college)?;
        }
        if let Some(position) = position {
            self.position = position;
        }
        Ok(())
    }

    /// Locks the current season and opens a fresh one for the following year.
    pub fn advance(&mut self) -> Result<(), SeasonError> {
        let old_year = self.current_year;
        let new_year = next_year(old_year)?;
        if self.season(new_year).is_some() {
            return Err(SeasonError::DuplicateSeason(new_year));
        }
        if let Ok(current) = self.season_mut(old_year) {
            current.is_editable = false;
        }
        self.seasons
            .push(Season::new(new_year, self.college.clone(), self.position));
        self.seasons.sort_by_key(|s| s.year);
        self.current_year = new_year;
        Ok(())
    }

    /// Drops the current season and reopens the previous one.
    pub fn rollback(&mut self) -> Result<RollbackOutcome, SeasonError> {
        if self.seasons.len() <= 1 {
            return Ok(RollbackOutcome::WouldBeEmpty);
        }
        let old_year = self.current_year;
        let new_year = previous_year(old_year)?;
        self.seasons.retain(|s| s.year != old_year);
        self.current_year = new_year;
        if let Ok(previous) = self.season_mut(new_year) {
            previous.is_editable = true;
        }
        self.sync_display();
        Ok(RollbackOutcome::RolledBack)
    }
}

#[cfg(test)]
mod tests {
    use crate::{MAX_YEAR, MIN_YEAR, PostSeason, PostSeasonKind, WinLoss};

    use super::*;

    fn career() -> Career {
        Career::start(2024, "Oregon", Position::HeadCoach).expect("valid career")
    }

    #[test]
    fn test_start_creates_single_open_season() {
        let career = career();
        assert_eq!(career.current_year(), 2024);
        assert_eq!(career.seasons().len(), 1);
        let season = &career.seasons()[0];
        assert_eq!(season.year, 2024);
        assert_eq!(season.record(), WinLoss::new(0, 0));
        assert!(season.is_editable);
        assert_eq!(season.college, "Oregon");
        assert_eq!(season.position, Position::HeadCoach);
        assert_eq!(season.post_season, PostSeason::None);
        assert!(!season.conf_champ);

        assert!(Career::start(2024, " ", Position::HeadCoach).is_err());
    }

    #[test]
    fn test_advance_then_rollback() {
        let mut career = career();
        career.advance().expect("advance should succeed");

        assert_eq!(career.current_year(), 2025);
        let years: Vec<_> = career
            .seasons()
            .iter()
            .map(|s| (s.year, s.is_editable))
            .collect();
        assert_eq!(years, vec![(2024, false), (2025, true)]);

        assert_eq!(career.rollback(), Ok(RollbackOutcome::RolledBack));
        assert_eq!(career.current_year(), 2024);
        assert_eq!(career.seasons().len(), 1);
        assert!(career.seasons()[0].is_editable);
    }

    #[test]
    fn test_rollback_reopens_manually_locked_season() {
        let mut career = career();
        career.toggle_editable(2024).expect("season exists");
        let before = career.clone();

        career.advance().expect("advance should succeed");
        career.rollback().expect("rollback should succeed");

        assert_ne!(career, before);
        assert!(career.season(2024).is_some_and(|s| s.is_editable));
        assert_eq!(career.current_year(), before.current_year());
    }

    #[test]
    fn test_rollback_of_single_season_is_refused() {
        let mut career = career();
        assert_eq!(career.rollback(), Ok(RollbackOutcome::WouldBeEmpty));
        assert_eq!(career.seasons().len(), 1);
        assert_eq!(career.current_year(), 2024);
    }

    #[test]
    fn test_advance_copies_current_profile() {
        let mut career = career();
        career
            .update_profile(Some("Texas"), Some(Position::OffensiveCoordinator))
            .expect("current season is editable");
        career.advance().expect("advance should succeed");

        let latest = career.latest_season().expect("has seasons");
        assert_eq!(latest.college, "Texas");
        assert_eq!(latest.position, Position::OffensiveCoordinator);
        assert_eq!(latest.record(), WinLoss::new(0, 0));
    }

    #[test]
    fn test_advance_refuses_existing_year() {
        let mut seasons = vec![Season::new(2024, "Oregon".into(), Position::HeadCoach)];
        seasons.push(Season::new(2025, "Oregon".into(), Position::HeadCoach));
        let mut career =
            Career::from_parts(2024, "Oregon".into(), Position::HeadCoach, seasons).unwrap();
        let before = career.clone();

        assert_eq!(career.advance(), Err(SeasonError::DuplicateSeason(2025)));
        assert_eq!(career, before);
    }

    #[test]
    fn test_year_clock_stays_in_range() {
        assert!(Career::start(i32::MAX, "Oregon", Position::HeadCoach).is_err());
        assert!(Career::start(0, "Oregon", Position::HeadCoach).is_err());

        let mut last = Career::start(MAX_YEAR, "Oregon", Position::HeadCoach).unwrap();
        let before = last.clone();
        assert!(matches!(
            last.advance(),
            Err(SeasonError::InvalidInput {
                field: "currentYear",
                ..
            })
        ));
        assert_eq!(last, before);

        let seasons = vec![
            Season::new(MIN_YEAR, "Oregon".into(), Position::HeadCoach),
            Season::new(MIN_YEAR + 1, "Oregon".into(), Position::HeadCoach),
        ];
        let mut first =
            Career::from_parts(MIN_YEAR, "Oregon".into(), Position::HeadCoach, seasons).unwrap();
        let before = first.clone();
        assert!(first.rollback().is_err());
        assert_eq!(first, before);
    }

    #[test]
    fn test_locked_season_cannot_be_updated() {
        let mut career = career();
        career.advance().expect("advance should succeed");
        let before = career.clone();

        let patch = SeasonPatch {
            wins: Some(11),
            ..Default::default()
        };
        assert_eq!(
            career.update_season(2024, &patch),
            Err(SeasonError::SeasonLocked(2024))
        );
        assert_eq!(career, before);

        career.toggle_editable(2024).expect("season exists");
        career
            .update_season(2024, &patch)
            .expect("season is unlocked");
        assert_eq!(career.season(2024).map(|s| s.wins), Some(11));
    }

    #[test]
    fn test_update_missing_season() {
        let mut career = career();
        assert_eq!(
            career.update_season(1999, &SeasonPatch::default()),
            Err(SeasonError::SeasonNotFound(1999))
        );
        assert_eq!(
            career.toggle_editable(1999),
            Err(SeasonError::SeasonNotFound(1999))
        );
    }

    #[test]
    fn test_latest_season_update_mirrors_profile() {
        let mut career = career();
        let patch = SeasonPatch {
            college: Some("Alabama".to_string()),
            position: Some(Position::DefensiveCoordinator),
            post_season: Some(PostSeasonKind::Bowl),
            ..Default::default()
        };
        career.update_season(2024, &patch).expect("editable");
        assert_eq!(career.college(), "Alabama");
        assert_eq!(career.position(), Position::DefensiveCoordinator);
    }

    #[test]
    fn test_from_parts_sorts_and_rejects_duplicates() {
        let seasons = vec![
            Season::new(2026, "A".into(), Position::HeadCoach),
            Season::new(2024, "A".into(), Position::HeadCoach),
        ];
        let career = Career::from_parts(2026, "A".into(), Position::HeadCoach, seasons).unwrap();
        let years: Vec<_> = career.seasons().iter().map(|s| s.year).collect();
        assert_eq!(years, vec![2024, 2026]);

        let duplicates = vec![
            Season::new(2024, "A".into(), Position::HeadCoach),
            Season::new(2024, "B".into(), Position::HeadCoach),
        ];
        assert_eq!(
            Career::from_parts(2024, "A".into(), Position::HeadCoach, duplicates),
            Err(SeasonError::DuplicateSeason(2024))
        );
    }
}
