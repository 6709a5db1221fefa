use std::sync::Arc;

use crate::{
    domain::{
        RepoCreateError, RepoRetrieveError,
        account::{Account, AccountRepository, PasswordHasher, validate_registration},
    },
    error::{ServiceError, ServiceResult, storage_failure},
    workflow::account::AccountView,
};

#[async_trait::async_trait]
pub trait RegisterAccountUseCase {
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ServiceResult<AccountView>;
}

pub struct RegisterAccountUseCaseImpl<AR: AccountRepository, H: PasswordHasher> {
    account_repository: Arc<AR>,
    password_hasher: Arc<H>,
}

impl<AR: AccountRepository, H: PasswordHasher> RegisterAccountUseCaseImpl<AR, H> {
    pub fn new(account_repository: Arc<AR>, password_hasher: Arc<H>) -> Self {
        Self {
            account_repository,
            password_hasher,
        }
    }

    async fn is_taken(&self, username: &str, email: &str) -> ServiceResult<bool> {
        for lookup in [
            self.account_repository.get_account_by_email(email).await,
            self.account_repository.get_account_by_username(username).await,
        ] {
            match lookup {
                Ok(_) => return Ok(true),
                Err(RepoRetrieveError::NotFound) => {}
                Err(RepoRetrieveError::StorageError(e)) => {
                    return Err(storage_failure("Looking up existing account", e));
                }
            }
        }
        Ok(false)
    }
}

#[async_trait::async_trait]
impl<AR, H> RegisterAccountUseCase for RegisterAccountUseCaseImpl<AR, H>
where
    AR: AccountRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ServiceResult<AccountView> {
        let registration = validate_registration(username, email, password)?;
        if self
            .is_taken(&registration.username, &registration.email)
            .await?
        {
            return ServiceError::conflict("User already exists");
        }

        let password_hash = self
            .password_hasher
            .hash(&registration.password)
            .map_err(|e| storage_failure("Hashing password", e))?;
        let account = Account::new(registration.username, registration.email, password_hash);

        match self.account_repository.create_account(&account).await {
            Ok(()) => {
                log::info!("Registered account {} ({})", account.username, account.account_id);
                Ok(account.into())
            }
            Err(RepoCreateError::Conflict) => ServiceError::conflict("User already exists"),
            Err(RepoCreateError::StorageError(e)) => Err(storage_failure("Creating account", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{MockAccountRepository, PlainPasswordHasher};

    use super::*;

    fn use_case(repo: &Arc<MockAccountRepository>) -> impl RegisterAccountUseCase {
        RegisterAccountUseCaseImpl::new(repo.clone(), Arc::new(PlainPasswordHasher))
    }

    #[tokio::test]
    async fn test_register_stores_hashed_account() {
        let repo = Arc::new(MockAccountRepository::default());
        let view = use_case(&repo)
            .register(" saban ", "nick@bama.edu", "rolltide")
            .await
            .unwrap();

        assert_eq!(view.username, "saban");
        assert_eq!(view.favorite_team, "");
        let stored = repo.get_account(view.account_id).await.unwrap();
        assert_eq!(stored.password_hash, "hashed:rolltide");
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates() {
        let repo = Arc::new(MockAccountRepository::default());
        let use_case = use_case(&repo);
        use_case
            .register("saban", "nick@bama.edu", "rolltide")
            .await
            .unwrap();

        assert!(matches!(
            use_case.register("saban", "other@bama.edu", "rolltide").await,
            Err(ServiceError::Conflict(_))
        ));
        assert!(matches!(
            use_case.register("kirby", "nick@bama.edu", "rolltide").await,
            Err(ServiceError::Conflict(_))
        ));
        assert!(matches!(
            use_case.register("kirby", "", "rolltide").await,
            Err(ServiceError::InvalidInput { .. })
        ));
    }
}
