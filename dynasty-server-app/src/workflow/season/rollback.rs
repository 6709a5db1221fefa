use std::sync::Arc;

use dynasty_core::{RollbackOutcome, previous_year};
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
pub trait RollbackSeasonUseCase {
    /// Moves the dynasty clock one year back. Coaches whose only season is
    /// the current one are deleted.
    async fn rollback_season(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
    ) -> ServiceResult<SeasonTransitionView>;
}

pub struct RollbackSeasonUseCaseImpl<
    A: DynastyAccessService,
    D: DynastyRepository,
    C: CoachRepository,
> {
    dynasty_access: Arc<A>,
    dynasty_repository: Arc<D>,
    coach_repository: Arc<C>,
}

impl<A: DynastyAccessService, D: DynastyRepository, C: CoachRepository + Sync>
    RollbackSeasonUseCaseImpl<A, D, C>
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

    /// `None` when the coach was deleted.
    async fn rollback_coach(&self, mut coach: Coach) -> Result<Option<Coach>, CoachFailure> {
        let coach_id = coach.coach_id;
        let fail = |message: String| CoachFailure { coach_id, message };

        match coach.career.rollback().map_err(|e| fail(e.to_string()))? {
            RollbackOutcome::RolledBack => {
                coach.touch();
                self.coach_repository
                    .save_coach(&coach)
                    .await
                    .map_err(|e| fail(e.to_string()))?;
                Ok(Some(coach))
            }
            RollbackOutcome::WouldBeEmpty => {
                self.coach_repository
                    .delete_coach(coach_id)
                    .await
                    .map_err(|e| fail(e.to_string()))?;
                log::info!("Coach {} had no earlier season and was deleted", coach_id);
                Ok(None)
            }
        }
    }
}

#[async_trait::async_trait]
impl<A, D, C> RollbackSeasonUseCase for RollbackSeasonUseCaseImpl<A, D, C>
where
    A: DynastyAccessService + Send + Sync + 'static,
    D: DynastyRepository + Send + Sync + 'static,
    C: CoachRepository + Send + Sync + 'static,
{
    async fn rollback_season(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
    ) -> ServiceResult<SeasonTransitionView> {
        let mut dynasty = self
            .dynasty_access
            .member_dynasty(account_id, dynasty_id)
            .await?;
        dynasty.current_year = previous_year(dynasty.current_year)?;
        dynasty.touch();
        self.dynasty_repository
            .update_dynasty(&dynasty)
            .await
            .map_err(|e| from_update("Rolling back dynasty year", "Dynasty", e))?;

        let coaches = self
            .coach_repository
            .list_coaches(dynasty_id)
            .await
            .map_err(|e| from_repo("Listing coaches for rollback", e))?;
        let results = join_all(coaches.into_iter().map(|coach| self.rollback_coach(coach))).await;

        let mut survivors = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(Some(coach)) => survivors.push(coach.into()),
                Ok(None) => {}
                Err(failure) => {
                    log::error!(
                        "Dynasty {} rolled back to {} but coach {} was not: {}",
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
            "Dynasty {} rolled back to {} ({} coaches remain, {} failures)",
            dynasty_id,
            dynasty.current_year,
            survivors.len(),
            failures.len()
        );

        Ok(SeasonTransitionView {
            dynasty: dynasty.into(),
            coaches: survivors,
            failures,
        })
    }
}
