use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    domain::{AccountId, DynastyId, dynasty::DynastyRepository},
    error::{ServiceResult, from_update},
    services::dynasty_access::DynastyAccessService,
    workflow::dynasty::{DynastyView, dynasty_name},
};

#[async_trait::async_trait]
pub trait UpdateDynastyUseCase {
    /// Renames or re-dates a dynasty. The year clock is not editable here.
    async fn update_dynasty(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
        name: Option<&str>,
        start_date: Option<NaiveDate>,
    ) -> ServiceResult<DynastyView>;
}

pub struct UpdateDynastyUseCaseImpl<A: DynastyAccessService, D: DynastyRepository> {
    dynasty_access: Arc<A>,
    dynasty_repository: Arc<D>,
}

impl<A: DynastyAccessService, D: DynastyRepository> UpdateDynastyUseCaseImpl<A, D> {
    pub fn new(dynasty_access: Arc<A>, dynasty_repository: Arc<D>) -> Self {
        Self {
            dynasty_access,
            dynasty_repository,
        }
    }
}

#[async_trait::async_trait]
impl<A, D> UpdateDynastyUseCase for UpdateDynastyUseCaseImpl<A, D>
where
    A: DynastyAccessService + Send + Sync + 'static,
    D: DynastyRepository + Send + Sync + 'static,
{
    async fn update_dynasty(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
        name: Option<&str>,
        start_date: Option<NaiveDate>,
    ) -> ServiceResult<DynastyView> {
        let name = name.map(dynasty_name).transpose()?;
        let mut dynasty = self
            .dynasty_access
            .owned_dynasty(account_id, dynasty_id)
            .await?;

        if let Some(name) = name {
            dynasty.name = name;
        }
        if let Some(start_date) = start_date {
            dynasty.start_date = start_date;
        }
        dynasty.touch();
        self.dynasty_repository
            .update_dynasty(&dynasty)
            .await
            .map_err(|e| from_update("Updating dynasty", "Dynasty", e))?;
        Ok(dynasty.into())
    }
}
