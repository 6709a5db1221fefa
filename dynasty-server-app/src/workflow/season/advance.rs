use std::sync::Arc;

use dynasty_core::next_year;
use futures::future::join_all;

use crate::{
    domain::{
        AccountId, DynastyId,
        coach::{Coach, CoachRepository},
        dynasty::DynastyRepository,
    },
    error::{ServiceResult, from_repo, from_update},
    services::dynasty_access::DynastyAccessService,
    workflow::season::{CoachFailure, SeasonTransitionView},
};

#[async_trait::async_trait]
pub trait AdvanceSeasonUseCase {
    /// Moves the dynasty clock one year forward and opens a new season for
    /// every coach.
    async fn advance_season(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
    ) -> ServiceResult<SeasonTransitionView>;
}

pub struct AdvanceSeasonUseCaseImpl<
    A: DynastyAccessService,
    D: DynastyRepository,
    C: CoachRepository,
> {
    dynasty_access: Arc<A>,
    dynasty_repository: Arc<D>,
    coach_repository: Arc<C>,
}

impl<A: DynastyAccessService, D: DynastyRepository, C: CoachRepository + Sync>
    AdvanceSeasonUseCaseImpl<A, D, C>
{
    pub fn new(
        dynasty_access: Arc<A>,
        dynasty_repository: Arc<D>,
        coach_repository: Arc<C>,
    ) -> Self {
        Self {
            dynasty_access,
            dynasty_repository,
            coach_repository,
        }
    }

    async fn advance_coach(&self, mut coach: Coach) -> Result<Coach, CoachFailure> {
        let coach_id = coach.coach_id;
        let fail = |message: String| CoachFailure { coach_id, message };

        coach.career.advance().map_err(|e| fail(e.to_string()))?;
        coach.touch();
        self.coach_repository
            .save_coach(&coach)
            .await
            .map_err(|e| fail(e.to_string()))?;
        Ok(coach)
    }
}

#[async_trait::async_trait]
impl<A, D, C> AdvanceSeasonUseCase for AdvanceSeasonUseCaseImpl<A, D, C>
where
    A: DynastyAccessService + Send + Sync + 'static,
    D: DynastyRepository + Send + Sync + 'static,
    C: CoachRepository + Send + Sync + 'static,
{
    async fn advance_season(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
    ) -> ServiceResult<SeasonTransitionView> {
        let mut dynasty = self
            .dynasty_access
            .member_dynasty(account_id, dynasty_id)
            .await?;
        dynasty.current_year = next_year(dynasty.current_year)?;
        dynasty.touch();
        self.dynasty_repository
            .update_dynasty(&dynasty)
            .await
            .map_err(|e| from_update("Advancing dynasty year", "Dynasty", e))?;

        let coaches = self
            .coach_repository
            .list_coaches(dynasty_id)
            .await
            .map_err(|e| from_repo("Listing coaches for advance", e))?;
        let results = join_all(coaches.into_iter().map(|coach| self.advance_coach(coach))).await;

        let mut advanced = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(coach) => advanced.push(coach.into()),
                Err(failure) => {
                    log::error!(
                        "Dynasty {} advanced to {} but coach {} was not: {}",
                        dynasty_id,
                        dynasty.current_year,
                        failure.coach_id,
                        failure.message
                    );
                    failures.push(failure);
                }
            }
        }
        log::info!(
            "Dynasty {} advanced to {} ({} coaches, {} failures)",
            dynasty_id,
            dynasty.current_year,
            advanced.len(),
            failures.len()
        );

        Ok(SeasonTransitionView {
            dynasty: dynasty.into(),
            coaches: advanced,
            failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use dynasty_core::{Career, MAX_YEAR, Position, Season};

    use crate::{
        error::ServiceError,
        testing::Fixture,
        workflow::season::rollback::{RollbackSeasonUseCase, RollbackSeasonUseCaseImpl},
    };

    use super::*;

    fn use_case(fixture: &Fixture) -> impl AdvanceSeasonUseCase {
        AdvanceSeasonUseCaseImpl::new(
            fixture.access.clone(),
            fixture.dynasties.clone(),
            fixture.coaches.clone(),
        )
    }

    #[tokio::test]
    async fn test_advance_then_rollback_scenario() {
        let fixture = Fixture::new(2024);
        let coach = fixture.add_coach();
        let owner = fixture.owner.account_id;
        let dynasty_id = fixture.dynasty.dynasty_id;

        let advanced = use_case(&fixture)
            .advance_season(owner, dynasty_id)
            .await
            .unwrap();
        assert!(advanced.failures.is_empty());
        assert_eq!(advanced.dynasty.current_year, 2025);
        assert_eq!(fixture.dynasties.current_year(dynasty_id), Some(2025));
        let view = &advanced.coaches[0];
        assert_eq!(view.current_year, 2025);
        let seasons: Vec<_> = view.seasons.iter().map(|s| (s.year, s.is_editable)).collect();
        assert_eq!(seasons, vec![(2024, false), (2025, true)]);

        let rollback = RollbackSeasonUseCaseImpl::new(
            fixture.access.clone(),
            fixture.dynasties.clone(),
            fixture.coaches.clone(),
        );
        let rolled_back = rollback.rollback_season(owner, dynasty_id).await.unwrap();
        assert_eq!(rolled_back.dynasty.current_year, 2024);
        assert_eq!(rolled_back.coaches.len(), 1);
        let restored = fixture.coaches.get(coach.coach_id).unwrap();
        assert_eq!(restored.career, coach.career);
    }

    #[tokio::test]
    async fn test_coach_with_next_year_is_reported() {
        let fixture = Fixture::new(2024);
        let healthy = fixture.add_coach();
        let mut ahead = fixture.add_coach();
        ahead.career = Career::from_parts(
            2024,
            "Alabama".to_string(),
            Position::HeadCoach,
            vec![
                Season::new(2024, "Alabama".to_string(), Position::HeadCoach),
                Season::new(2025, "Alabama".to_string(), Position::HeadCoach),
            ],
        )
        .unwrap();
        fixture.coaches.insert(ahead.clone());

        let result = use_case(&fixture)
            .advance_season(fixture.owner.account_id, fixture.dynasty.dynasty_id)
            .await
            .unwrap();

        assert_eq!(result.dynasty.current_year, 2025);
        assert_eq!(result.coaches.len(), 1);
        assert_eq!(result.coaches[0].coach_id, healthy.coach_id);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].coach_id, ahead.coach_id);
        assert_eq!(fixture.coaches.get(ahead.coach_id), Some(ahead));
    }

    #[tokio::test]
    async fn test_save_failure_keeps_year_increment() {
        let fixture = Fixture::new(2024);
        let broken = fixture.add_coach();
        fixture.coaches.fail_writes_for(broken.coach_id);

        let result = use_case(&fixture)
            .advance_season(fixture.owner.account_id, fixture.dynasty.dynasty_id)
            .await
            .unwrap();

        assert!(result.coaches.is_empty());
        assert_eq!(result.failures[0].coach_id, broken.coach_id);
        assert_eq!(
            fixture.dynasties.current_year(fixture.dynasty.dynasty_id),
            Some(2025)
        );
    }

    #[tokio::test]
    async fn test_advance_past_last_year_is_rejected() {
        let fixture = Fixture::new(MAX_YEAR);
        let coach = fixture.add_coach();

        let err = use_case(&fixture)
            .advance_season(fixture.owner.account_id, fixture.dynasty.dynasty_id)
            .await
            .unwrap_err();

        assert_eq!(err.field(), Some("currentYear"));
        assert_eq!(
            fixture.dynasties.current_year(fixture.dynasty.dynasty_id),
            Some(MAX_YEAR)
        );
        assert_eq!(fixture.coaches.get(coach.coach_id), Some(coach));
    }

    #[tokio::test]
    async fn test_advance_unknown_dynasty() {
        let fixture = Fixture::new(2024);
        assert!(matches!(
            use_case(&fixture)
                .advance_season(fixture.owner.account_id, DynastyId::new())
                .await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
