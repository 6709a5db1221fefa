use std::sync::Arc;

use crate::{
    domain::{
        AccountId, DynastyId, account::AccountRepository, coach::CoachRepository,
        dynasty::DynastyRepository,
    },
    error::{ServiceResult, from_repo},
    services::dynasty_access::DynastyAccessService,
    workflow::dynasty::create::unlink_account,
};

#[async_trait::async_trait]
pub trait DeleteDynastyUseCase {
    async fn delete_dynasty(&self, account_id: AccountId, dynasty_id: DynastyId)
    -> ServiceResult<()>;
}

pub struct DeleteDynastyUseCaseImpl<
    A: DynastyAccessService,
    D: DynastyRepository,
    C: CoachRepository,
    AR: AccountRepository,
> {
    dynasty_access: Arc<A>,
    dynasty_repository: Arc<D>,
    coach_repository: Arc<C>,
    account_repository: Arc<AR>,
}

impl<A: DynastyAccessService, D: DynastyRepository, C: CoachRepository, AR: AccountRepository>
    DeleteDynastyUseCaseImpl<A, D, C, AR>
{
    pub fn new(
        dynasty_access: Arc<A>,
        dynasty_repository: Arc<D>,
        coach_repository: Arc<C>,
        account_repository: Arc<AR>,
    ) -> Self {
        Self {
            dynasty_access,
            dynasty_repository,
            coach_repository,
            account_repository,
        }
    }
}

#[async_trait::async_trait]
impl<A, D, C, AR> DeleteDynastyUseCase for DeleteDynastyUseCaseImpl<A, D, C, AR>
where
    A: DynastyAccessService + Send + Sync + 'static,
    D: DynastyRepository + Send + Sync + 'static,
    C: CoachRepository + Send + Sync + 'static,
    AR: AccountRepository + Send + Sync + 'static,
{
    async fn delete_dynasty(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
    ) -> ServiceResult<()> {
        let dynasty = self
            .dynasty_access
            .owned_dynasty(account_id, dynasty_id)
            .await?;

        self.coach_repository
            .delete_coaches_of_dynasty(dynasty_id)
            .await
            .map_err(|e| from_repo("Deleting coaches of dynasty", e))?;
        self.dynasty_repository
            .delete_dynasty(dynasty_id)
            .await
            .map_err(|e| from_repo("Deleting dynasty", e))?;

        for member in std::iter::once(dynasty.owner_id).chain(dynasty.shared_with.iter().copied()) {
            unlink_account(self.account_repository.as_ref(), member, &dynasty).await;
        }
        log::info!("Dynasty {} deleted by {}", dynasty_id, account_id);
        Ok(())
    }
}
