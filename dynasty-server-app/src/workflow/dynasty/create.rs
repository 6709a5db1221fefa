use std::sync::Arc;

use chrono::NaiveDate;
use dynasty_core::{checked_year, current_calendar_year};

use crate::{
    domain::{
        AccountId, RepoCreateError,
        account::AccountRepository,
        dynasty::{Dynasty, DynastyRepository},
    },
    error::{ServiceError, ServiceResult, storage_failure},
    workflow::dynasty::{DynastyView, dynasty_name},
};

#[async_trait::async_trait]
pub trait CreateDynastyUseCase {
    /// Without an explicit year the dynasty starts in the current calendar year.
    async fn create_dynasty(
        &self,
        account_id: AccountId,
        name: &str,
        start_date: NaiveDate,
        current_year: Option<i32>,
    ) -> ServiceResult<DynastyView>;
}

pub struct CreateDynastyUseCaseImpl<D: DynastyRepository, AR: AccountRepository> {
    dynasty_repository: Arc<D>,
    account_repository: Arc<AR>,
}

impl<D: DynastyRepository, AR: AccountRepository> CreateDynastyUseCaseImpl<D, AR> {
    pub fn new(dynasty_repository: Arc<D>, account_repository: Arc<AR>) -> Self {
        Self {
            dynasty_repository,
            account_repository,
        }
    }
}

#[async_trait::async_trait]
impl<D, AR> CreateDynastyUseCase for CreateDynastyUseCaseImpl<D, AR>
where
    D: DynastyRepository + Send + Sync + 'static,
    AR: AccountRepository + Send + Sync + 'static,
{
    async fn create_dynasty(
        &self,
        account_id: AccountId,
        name: &str,
        start_date: NaiveDate,
        current_year: Option<i32>,
    ) -> ServiceResult<DynastyView> {
        let name = dynasty_name(name)?;
        let current_year = checked_year(current_year.unwrap_or_else(current_calendar_year))?;

        let dynasty = Dynasty::new(account_id, name, start_date, current_year);
        match self.dynasty_repository.create_dynasty(&dynasty).await {
            Ok(()) => {}
            Err(RepoCreateError::Conflict) => return ServiceError::conflict("Dynasty already exists"),
            Err(RepoCreateError::StorageError(e)) => {
                return Err(storage_failure("Creating dynasty", e));
            }
        }
        log::info!(
            "Account {} created dynasty {} ({}) in {}",
            account_id,
            dynasty.name,
            dynasty.dynasty_id,
            dynasty.current_year
        );

        link_account(self.account_repository.as_ref(), account_id, &dynasty).await;
        Ok(dynasty.into())
    }
}

/// Mirrors the dynasty into the account's dynasty list. The dynasty row is
/// authoritative, so a failure here is only logged.
pub(crate) async fn link_account<AR: AccountRepository + Sync>(
    account_repository: &AR,
    account_id: AccountId,
    dynasty: &Dynasty,
) {
    let result = match account_repository.get_account(account_id).await {
        Ok(mut account) => {
            account.add_dynasty(dynasty.dynasty_id);
            account_repository
                .update_account(&account)
                .await
                .map_err(|e| e.to_string())
        }
        Err(e) => Err(e.to_string()),
    };
    if let Err(e) = result {
        log::error!(
            "Failed to link dynasty {} to account {}: {}",
            dynasty.dynasty_id,
            account_id,
            e
        );
    }
}

/// Counterpart of [`link_account`].
pub(crate) async fn unlink_account<AR: AccountRepository + Sync>(
    account_repository: &AR,
    account_id: AccountId,
    dynasty: &Dynasty,
) {
    let result = match account_repository.get_account(account_id).await {
        Ok(mut account) => {
            account.remove_dynasty(dynasty.dynasty_id);
            account_repository
                .update_account(&account)
                .await
                .map_err(|e| e.to_string())
        }
        Err(e) => Err(e.to_string()),
    };
    if let Err(e) = result {
        log::error!(
            "Failed to unlink dynasty {} from account {}: {}",
            dynasty.dynasty_id,
            account_id,
            e
        );
    }
}

#[cfg(test)]
mod tests {
    use dynasty_core::MAX_YEAR;

    use crate::testing::{MockAccountRepository, MockDynastyRepository, account};

    use super::*;

    #[tokio::test]
    async fn test_create_dynasty() {
        let accounts = Arc::new(MockAccountRepository::default());
        let owner = account("saban", "nick@bama.edu", "rolltide");
        accounts.insert(owner.clone());
        let dynasties = Arc::new(MockDynastyRepository::default());
        let use_case = CreateDynastyUseCaseImpl::new(dynasties.clone(), accounts.clone());
        let start = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();

        let view = use_case
            .create_dynasty(owner.account_id, "  Bama Rebuild ", start, Some(2024))
            .await
            .unwrap();
        assert_eq!(view.name, "Bama Rebuild");
        assert_eq!(view.current_year, 2024);
        assert_eq!(view.owner_id, owner.account_id);

        let linked = accounts.get_account(owner.account_id).await.unwrap();
        assert_eq!(linked.dynasty_ids, vec![view.dynasty_id]);

        let defaulted = use_case
            .create_dynasty(owner.account_id, "Second", start, None)
            .await
            .unwrap();
        assert_eq!(defaulted.current_year, current_calendar_year());

        assert!(matches!(
            use_case
                .create_dynasty(owner.account_id, "   ", start, None)
                .await,
            Err(ServiceError::InvalidInput { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_dynasty_rejects_years_out_of_range() {
        let accounts = Arc::new(MockAccountRepository::default());
        let owner = account("saban", "nick@bama.edu", "rolltide");
        accounts.insert(owner.clone());
        let use_case =
            CreateDynastyUseCaseImpl::new(Arc::new(MockDynastyRepository::default()), accounts);
        let start = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();

        for year in [0, -1, MAX_YEAR + 1, i32::MAX] {
            let err = use_case
                .create_dynasty(owner.account_id, "Bama", start, Some(year))
                .await
                .unwrap_err();
            assert_eq!(err.field(), Some("currentYear"));
        }
        let last = use_case
            .create_dynasty(owner.account_id, "Bama", start, Some(MAX_YEAR))
            .await
            .unwrap();
        assert_eq!(last.current_year, MAX_YEAR);
    }
}
