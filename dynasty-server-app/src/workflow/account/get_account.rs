use std::sync::Arc;

use crate::{
    domain::{AccountId, account::AccountRepository},
    error::{ServiceResult, from_retrieve},
    workflow::account::AccountView,
};

#[async_trait::async_trait]
pub trait GetAccountUseCase {
    async fn get_account(&self, account_id: AccountId) -> ServiceResult<AccountView>;
}

pub struct GetAccountUseCaseImpl<AR: AccountRepository> {
    account_repository: Arc<AR>,
}

impl<AR: AccountRepository> GetAccountUseCaseImpl<AR> {
    pub fn new(account_repository: Arc<AR>) -> Self {
        Self { account_repository }
    }
}

#[async_trait::async_trait]
impl<AR: AccountRepository + Send + Sync + 'static> GetAccountUseCase for GetAccountUseCaseImpl<AR> {
    async fn get_account(&self, account_id: AccountId) -> ServiceResult<AccountView> {
        self.account_repository
            .get_account(account_id)
            .await
            .map(AccountView::from)
            .map_err(|e| from_retrieve("Loading account", "User", e))
    }
}
