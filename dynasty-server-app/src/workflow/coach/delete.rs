use std::sync::Arc;

use crate::{
    domain::{AccountId, CoachId, DynastyId, coach::CoachRepository},
    error::{ServiceResult, from_repo},
    services::dynasty_access::DynastyAccessService,
};

#[async_trait::async_trait]
pub trait DeleteCoachUseCase {
    async fn delete_coach(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
        coach_id: CoachId,
    ) -> ServiceResult<()>;
}

pub struct DeleteCoachUseCaseImpl<A: DynastyAccessService, C: CoachRepository> {
    dynasty_access: Arc<A>,
    coach_repository: Arc<C>,
}

impl<A: DynastyAccessService, C: CoachRepository> DeleteCoachUseCaseImpl<A, C> {
    pub fn new(dynasty_access: Arc<A>, coach_repository: Arc<C>) -> Self {
        Self {
            dynasty_access,
            coach_repository,
        }
    }
}

#[async_trait::async_trait]
impl<A, C> DeleteCoachUseCase for DeleteCoachUseCaseImpl<A, C>
where
    A: DynastyAccessService + Send + Sync + 'static,
    C: CoachRepository + Send + Sync + 'static,
{
    async fn delete_coach(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
        coach_id: CoachId,
    ) -> ServiceResult<()> {
        self.dynasty_access
            .member_coach(account_id, dynasty_id, coach_id)
            .await?;
        self.coach_repository
            .delete_coach(coach_id)
            .await
            .map_err(|e| from_repo("Deleting coach", e))?;
        log::info!("Coach {} removed from dynasty {}", coach_id, dynasty_id);
        Ok(())
    }
}
