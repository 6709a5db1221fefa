use std::sync::Arc;

use crate::{
    domain::{AccountId, dynasty::DynastyRepository},
    error::{ServiceResult, from_repo},
    workflow::dynasty::DynastyView,
};

#[async_trait::async_trait]
pub trait ListDynastiesUseCase {
    async fn list_dynasties(&self, account_id: AccountId) -> ServiceResult<Vec<DynastyView>>;
}

pub struct ListDynastiesUseCaseImpl<D: DynastyRepository> {
    dynasty_repository: Arc<D>,
}

impl<D: DynastyRepository> ListDynastiesUseCaseImpl<D> {
    pub fn new(dynasty_repository: Arc<D>) -> Self {
        Self { dynasty_repository }
    }
}

#[async_trait::async_trait]
impl<D: DynastyRepository + Send + Sync + 'static> ListDynastiesUseCase
    for ListDynastiesUseCaseImpl<D>
{
    async fn list_dynasties(&self, account_id: AccountId) -> ServiceResult<Vec<DynastyView>> {
        let dynasties = self
            .dynasty_repository
            .list_dynasties_for_account(account_id)
            .await
            .map_err(|e| from_repo("Listing dynasties", e))?;
        Ok(dynasties.into_iter().map(DynastyView::from).collect())
    }
}
