use std::sync::Arc;

use crate::{
    domain::{AccountId, account::AccountRepository},
    error::{ServiceResult, from_retrieve, from_update},
};

#[async_trait::async_trait]
pub trait FavoriteTeamUseCase {
    async fn get_favorite_team(&self, account_id: AccountId) -> ServiceResult<String>;
    async fn set_favorite_team(&self, account_id: AccountId, team: &str) -> ServiceResult<String>;
}

pub struct FavoriteTeamUseCaseImpl<AR: AccountRepository> {
    account_repository: Arc<AR>,
}

impl<AR: AccountRepository> FavoriteTeamUseCaseImpl<AR> {
    pub fn new(account_repository: Arc<AR>) -> Self {
        Self { account_repository }
    }
}

#[async_trait::async_trait]
impl<AR: AccountRepository + Send + Sync + 'static> FavoriteTeamUseCase
    for FavoriteTeamUseCaseImpl<AR>
{
    async fn get_favorite_team(&self, account_id: AccountId) -> ServiceResult<String> {
        let account = self
            .account_repository
            .get_account(account_id)
            .await
            .map_err(|e| from_retrieve("Loading account", "User", e))?;
        Ok(account.favorite_team)
    }

    /// An empty team clears the selection.
    async fn set_favorite_team(&self, account_id: AccountId, team: &str) -> ServiceResult<String> {
        let mut account = self
            .account_repository
            .get_account(account_id)
            .await
            .map_err(|e| from_retrieve("Loading account", "User", e))?;
        account.favorite_team = team.trim().to_string();
        self.account_repository
            .update_account(&account)
            .await
            .map_err(|e| from_update("Saving favorite team", "User", e))?;
        Ok(account.favorite_team)
    }
}
