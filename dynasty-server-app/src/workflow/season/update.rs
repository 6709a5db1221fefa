use std::sync::Arc;

use dynasty_core::SeasonPatch;

use crate::{
    domain::{AccountId, CoachId, DynastyId, coach::CoachRepository},
    error::{ServiceResult, from_update},
    services::dynasty_access::DynastyAccessService,
    workflow::coach::CoachView,
};

#[async_trait::async_trait]
pub trait UpdateSeasonUseCase {
    async fn update_season(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
        coach_id: CoachId,
        year: i32,
        patch: SeasonPatch,
    ) -> ServiceResult<CoachView>;
}

pub struct UpdateSeasonUseCaseImpl<A: DynastyAccessService, C: CoachRepository> {
    dynasty_access: Arc<A>,
    coach_repository: Arc<C>,
}

impl<A: DynastyAccessService, C: CoachRepository> UpdateSeasonUseCaseImpl<A, C> {
    pub fn new(dynasty_access: Arc<A>, coach_repository: Arc<C>) -> Self {
        Self {
            dynasty_access,
            coach_repository,
        }
    }
}

#[async_trait::async_trait]
impl<A, C> UpdateSeasonUseCase for UpdateSeasonUseCaseImpl<A, C>
where
    A: DynastyAccessService + Send + Sync + 'static,
    C: CoachRepository + Send + Sync + 'static,
{
    async fn update_season(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
        coach_id: CoachId,
        year: i32,
        patch: SeasonPatch,
    ) -> ServiceResult<CoachView> {
        let (_, mut coach) = self
            .dynasty_access
            .member_coach(account_id, dynasty_id, coach_id)
            .await?;
        coach.career.update_season(year, &patch)?;
        coach.touch();
        self.coach_repository
            .save_coach(&coach)
            .await
            .map_err(|e| from_update("Saving season", "Coach", e))?;
        log::debug!("Season {} of coach {} updated", year, coach_id);
        Ok(coach.into())
    }
}

#[cfg(test)]
mod tests {
    use dynasty_core::{PlayoffResult, PostSeasonKind, WinLoss};

    use crate::{error::ServiceError, testing::Fixture};

    use super::*;

    #[tokio::test]
    async fn test_update_season_recomputes_record() {
        let fixture = Fixture::new(2024);
        let coach = fixture.add_coach();
        let use_case = UpdateSeasonUseCaseImpl::new(fixture.access.clone(), fixture.coaches.clone());

        let patch = SeasonPatch {
            wins: Some(12),
            losses: Some(1),
            conf_champ: Some(true),
            post_season: Some(PostSeasonKind::Playoff),
            playoff_seed: Some(2),
            playoff_result: Some(PlayoffResult::Champion),
            ..Default::default()
        };
        let view = use_case
            .update_season(
                fixture.owner.account_id,
                fixture.dynasty.dynasty_id,
                coach.coach_id,
                2024,
                patch,
            )
            .await
            .unwrap();

        assert_eq!(view.record.career, WinLoss::new(12, 1));
        assert_eq!(view.record.career.win_percentage(), 92.3);
        assert_eq!(view.record.postseason, WinLoss::new(3, 0));
        assert_eq!(view.record.national_championships, 1);
        assert_eq!(view.record.conf_championships, 1);
    }

    #[tokio::test]
    async fn test_update_season_errors() {
        let fixture = Fixture::new(2024);
        let mut coach = fixture.add_coach();
        coach.career.toggle_editable(2024).unwrap();
        fixture.coaches.insert(coach.clone());
        let use_case = UpdateSeasonUseCaseImpl::new(fixture.access.clone(), fixture.coaches.clone());
        let owner = fixture.owner.account_id;
        let dynasty_id = fixture.dynasty.dynasty_id;

        let patch = SeasonPatch {
            wins: Some(3),
            ..Default::default()
        };
        assert!(matches!(
            use_case
                .update_season(owner, dynasty_id, coach.coach_id, 2024, patch.clone())
                .await,
            Err(ServiceError::Forbidden(_))
        ));
        assert!(matches!(
            use_case
                .update_season(owner, dynasty_id, coach.coach_id, 2023, patch.clone())
                .await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            use_case
                .update_season(owner, dynasty_id, CoachId::new(), 2024, patch)
                .await,
            Err(ServiceError::NotFound(_))
        ));
        assert_eq!(fixture.coaches.get(coach.coach_id), Some(coach));
    }
}
