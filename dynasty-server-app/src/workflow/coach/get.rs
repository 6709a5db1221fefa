use std::sync::Arc;

use crate::{
    domain::{AccountId, CoachId, DynastyId},
    error::ServiceResult,
    services::dynasty_access::DynastyAccessService,
    workflow::coach::CoachView,
};

#[async_trait::async_trait]
pub trait GetCoachUseCase {
    async fn get_coach(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
        coach_id: CoachId,
    ) -> ServiceResult<CoachView>;
}

pub struct GetCoachUseCaseImpl<A: DynastyAccessService> {
    dynasty_access: Arc<A>,
}

impl<A: DynastyAccessService> GetCoachUseCaseImpl<A> {
    pub fn new(dynasty_access: Arc<A>) -> Self {
        Self { dynasty_access }
    }
}

#[async_trait::async_trait]
impl<A: DynastyAccessService + Send + Sync + 'static> GetCoachUseCase for GetCoachUseCaseImpl<A> {
    async fn get_coach(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
        coach_id: CoachId,
    ) -> ServiceResult<CoachView> {
        let (_, coach) = self
            .dynasty_access
            .member_coach(account_id, dynasty_id, coach_id)
            .await?;
        Ok(coach.into())
    }
}
