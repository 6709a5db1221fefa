use std::sync::Arc;

use crate::{
    domain::{AccountId, DynastyId},
    error::ServiceResult,
    services::dynasty_access::DynastyAccessService,
    workflow::dynasty::DynastyView,
};

#[async_trait::async_trait]
pub trait GetDynastyUseCase {
    async fn get_dynasty(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
    ) -> ServiceResult<DynastyView>;
}

pub struct GetDynastyUseCaseImpl<A: DynastyAccessService> {
    dynasty_access: Arc<A>,
}

impl<A: DynastyAccessService> GetDynastyUseCaseImpl<A> {
    pub fn new(dynasty_access: Arc<A>) -> Self {
        Self { dynasty_access }
    }
}

#[async_trait::async_trait]
impl<A: DynastyAccessService + Send + Sync + 'static> GetDynastyUseCase
    for GetDynastyUseCaseImpl<A>
{
    async fn get_dynasty(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
    ) -> ServiceResult<DynastyView> {
        let dynasty = self
            .dynasty_access
            .member_dynasty(account_id, dynasty_id)
            .await?;
        Ok(dynasty.into())
    }
}
