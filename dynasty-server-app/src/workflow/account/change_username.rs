use std::sync::Arc;

use crate::{
    domain::{
        AccountId, RepoRetrieveError,
        account::{AccountRepository, validate_username},
    },
    error::{ServiceError, ServiceResult, from_retrieve, from_update, storage_failure},
    workflow::account::AccountView,
};

#[async_trait::async_trait]
pub trait ChangeUsernameUseCase {
    async fn change_username(
        &self,
        account_id: AccountId,
        new_username: &str,
    ) -> ServiceResult<AccountView>;
}

pub struct ChangeUsernameUseCaseImpl<AR: AccountRepository> {
    account_repository: Arc<AR>,
}

impl<AR: AccountRepository> ChangeUsernameUseCaseImpl<AR> {
    pub fn new(account_repository: Arc<AR>) -> Self {
        Self { account_repository }
    }
}

#[async_trait::async_trait]
impl<AR: AccountRepository + Send + Sync + 'static> ChangeUsernameUseCase
    for ChangeUsernameUseCaseImpl<AR>
{
    async fn change_username(
        &self,
        account_id: AccountId,
        new_username: &str,
    ) -> ServiceResult<AccountView> {
        let new_username = validate_username(new_username)?;
        match self
            .account_repository
            .get_account_by_username(&new_username)
            .await
        {
            Ok(existing) if existing.account_id != account_id => {
                return ServiceError::conflict("Username already taken");
            }
            Ok(_) | Err(RepoRetrieveError::NotFound) => {}
            Err(RepoRetrieveError::StorageError(e)) => {
                return Err(storage_failure("Checking username", e));
            }
        }

        let mut account = self
            .account_repository
            .get_account(account_id)
            .await
            .map_err(|e| from_retrieve("Loading account", "User", e))?;
        let old_username = std::mem::replace(&mut account.username, new_username);
        self.account_repository
            .update_account(&account)
            .await
            .map_err(|e| from_update("Renaming account", "Username", e))?;
        log::info!(
            "Account {} renamed from {} to {}",
            account_id,
            old_username,
            account.username
        );
        Ok(account.into())
    }
}
