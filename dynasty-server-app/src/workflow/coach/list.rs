use std::sync::Arc;

use crate::{
    domain::{AccountId, DynastyId, coach::CoachRepository},
    error::{ServiceResult, from_repo},
    services::dynasty_access::DynastyAccessService,
    workflow::coach::CoachView,
};

#[async_trait::async_trait]
pub trait ListCoachesUseCase {
    async fn list_coaches(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
    ) -> ServiceResult<Vec<CoachView>>;
}

pub struct ListCoachesUseCaseImpl<A: DynastyAccessService, C: CoachRepository> {
    dynasty_access: Arc<A>,
    coach_repository: Arc<C>,
}

impl<A: DynastyAccessService, C: CoachRepository> ListCoachesUseCaseImpl<A, C> {
    pub fn new(dynasty_access: Arc<A>, coach_repository: Arc<C>) -> Self {
        Self {
            dynasty_access,
            coach_repository,
        }
    }
}

#[async_trait::async_trait]
impl<A, C> ListCoachesUseCase for ListCoachesUseCaseImpl<A, C>
where
    A: DynastyAccessService + Send + Sync + 'static,
    C: CoachRepository + Send + Sync + 'static,
{
    async fn list_coaches(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
    ) -> ServiceResult<Vec<CoachView>> {
        self.dynasty_access
            .member_dynasty(account_id, dynasty_id)
            .await?;
        let coaches = self
            .coach_repository
            .list_coaches(dynasty_id)
            .await
            .map_err(|e| from_repo("Listing coaches", e))?;
        Ok(coaches.into_iter().map(CoachView::from).collect())
    }
}
