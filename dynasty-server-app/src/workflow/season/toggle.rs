use std::sync::Arc;

use crate::{
    domain::{AccountId, CoachId, DynastyId, coach::CoachRepository},
    error::{ServiceResult, from_update},
    services::dynasty_access::DynastyAccessService,
    workflow::coach::CoachView,
};

#[async_trait::async_trait]
pub trait ToggleSeasonEditUseCase {
    async fn toggle_season_edit(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
        coach_id: CoachId,
        year: i32,
    ) -> ServiceResult<CoachView>;
}

pub struct ToggleSeasonEditUseCaseImpl<A: DynastyAccessService, C: CoachRepository> {
    dynasty_access: Arc<A>,
    coach_repository: Arc<C>,
}

impl<A: DynastyAccessService, C: CoachRepository> ToggleSeasonEditUseCaseImpl<A, C> {
    pub fn new(dynasty_access: Arc<A>, coach_repository: Arc<C>) -> Self {
        Self {
            dynasty_access,
            coach_repository,
        }
    }
}

#[async_trait::async_trait]
impl<A, C> ToggleSeasonEditUseCase for ToggleSeasonEditUseCaseImpl<A, C>
where
    A: DynastyAccessService + Send + Sync + 'static,
    C: CoachRepository + Send + Sync + 'static,
{
    async fn toggle_season_edit(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
        coach_id: CoachId,
        year: i32,
    ) -> ServiceResult<CoachView> {
        let (_, mut coach) = self
            .dynasty_access
            .member_coach(account_id, dynasty_id, coach_id)
            .await?;
        let editable = coach.career.toggle_editable(year)?;
        coach.touch();
        self.coach_repository
            .save_coach(&coach)
            .await
            .map_err(|e| from_update("Saving season lock", "Coach", e))?;
        log::info!(
            "Season {} of coach {} is now {}",
            year,
            coach_id,
            if editable { "editable" } else { "locked" }
        );
        Ok(coach.into())
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::Fixture;

    use super::*;

    #[tokio::test]
    async fn test_toggle_flips_only_the_lock() {
        let fixture = Fixture::new(2024);
        let coach = fixture.add_coach();
        let use_case =
            ToggleSeasonEditUseCaseImpl::new(fixture.access.clone(), fixture.coaches.clone());
        let owner = fixture.owner.account_id;
        let dynasty_id = fixture.dynasty.dynasty_id;

        let locked = use_case
            .toggle_season_edit(owner, dynasty_id, coach.coach_id, 2024)
            .await
            .unwrap();
        assert!(!locked.seasons[0].is_editable);
        assert_eq!(locked.current_year, 2024);

        let unlocked = use_case
            .toggle_season_edit(owner, dynasty_id, coach.coach_id, 2024)
            .await
            .unwrap();
        assert_eq!(unlocked.seasons, coach.career.seasons().to_vec());
    }
}
