use std::sync::Arc;

use crate::{
    domain::{
        AccountId, DynastyId, RepoRetrieveError,
        account::{Account, AccountRepository},
        dynasty::DynastyRepository,
    },
    error::{ServiceError, ServiceResult, from_update, storage_failure},
    services::dynasty_access::DynastyAccessService,
    workflow::dynasty::{
        DynastyView,
        create::{link_account, unlink_account},
    },
};

/// Grants and revokes access to a dynasty for other accounts. Owner only.
#[async_trait::async_trait]
pub trait ShareDynastyUseCase {
    async fn share_dynasty(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
        username: &str,
    ) -> ServiceResult<DynastyView>;
    async fn revoke_dynasty(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
        username: &str,
    ) -> ServiceResult<DynastyView>;
}

pub struct ShareDynastyUseCaseImpl<
    A: DynastyAccessService,
    D: DynastyRepository,
    AR: AccountRepository,
> {
    dynasty_access: Arc<A>,
    dynasty_repository: Arc<D>,
    account_repository: Arc<AR>,
}

impl<A: DynastyAccessService, D: DynastyRepository, AR: AccountRepository>
    ShareDynastyUseCaseImpl<A, D, AR>
{
    pub fn new(
        dynasty_access: Arc<A>,
        dynasty_repository: Arc<D>,
        account_repository: Arc<AR>,
    ) -> Self {
        Self {
            dynasty_access,
            dynasty_repository,
            account_repository,
        }
    }

    async fn resolve(&self, username: &str) -> ServiceResult<Account> {
        match self
            .account_repository
            .get_account_by_username(username.trim())
            .await
        {
            Ok(account) => Ok(account),
            Err(RepoRetrieveError::NotFound) => ServiceError::not_found("User not found"),
            Err(RepoRetrieveError::StorageError(e)) => {
                Err(storage_failure("Resolving username", e))
            }
        }
    }
}

#[async_trait::async_trait]
impl<A, D, AR> ShareDynastyUseCase for ShareDynastyUseCaseImpl<A, D, AR>
where
    A: DynastyAccessService + Send + Sync + 'static,
    D: DynastyRepository + Send + Sync + 'static,
    AR: AccountRepository + Send + Sync + 'static,
{
    async fn share_dynasty(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
        username: &str,
    ) -> ServiceResult<DynastyView> {
        let mut dynasty = self
            .dynasty_access
            .owned_dynasty(account_id, dynasty_id)
            .await?;
        let member = self.resolve(username).await?;
        if dynasty.is_owner(member.account_id) {
            return ServiceError::invalid_input("username", "The owner already has access");
        }
        if dynasty.shared_with.contains(&member.account_id) {
            return Ok(dynasty.into());
        }

        dynasty.shared_with.push(member.account_id);
        dynasty.touch();
        self.dynasty_repository
            .update_dynasty(&dynasty)
            .await
            .map_err(|e| from_update("Sharing dynasty", "Dynasty", e))?;
        link_account(self.account_repository.as_ref(), member.account_id, &dynasty).await;
        log::info!("Dynasty {} shared with {}", dynasty_id, member.account_id);
        Ok(dynasty.into())
    }

    async fn revoke_dynasty(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
        username: &str,
    ) -> ServiceResult<DynastyView> {
        let mut dynasty = self
            .dynasty_access
            .owned_dynasty(account_id, dynasty_id)
            .await?;
        let member = self.resolve(username).await?;
        if !dynasty.shared_with.contains(&member.account_id) {
            return ServiceError::not_found("Dynasty is not shared with this user");
        }

        dynasty.shared_with.retain(|id| *id != member.account_id);
        dynasty.touch();
        self.dynasty_repository
            .update_dynasty(&dynasty)
            .await
            .map_err(|e| from_update("Revoking dynasty access", "Dynasty", e))?;
        unlink_account(self.account_repository.as_ref(), member.account_id, &dynasty).await;
        log::info!("Dynasty {} no longer shared with {}", dynasty_id, member.account_id);
        Ok(dynasty.into())
    }
}
