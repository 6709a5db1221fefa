use std::sync::Arc;

use crate::{
    domain::{
        RepoRetrieveError,
        account::{AccountRepository, PasswordHasher},
    },
    error::{ServiceError, ServiceResult, storage_failure},
    workflow::account::AccountView,
};

#[async_trait::async_trait]
pub trait LoginUseCase {
    async fn login(&self, email: &str, password: &str) -> ServiceResult<AccountView>;
}

pub struct LoginUseCaseImpl<AR: AccountRepository, H: PasswordHasher> {
    account_repository: Arc<AR>,
    password_hasher: Arc<H>,
}

impl<AR: AccountRepository, H: PasswordHasher> LoginUseCaseImpl<AR, H> {
    pub fn new(account_repository: Arc<AR>, password_hasher: Arc<H>) -> Self {
        Self {
            account_repository,
            password_hasher,
        }
    }
}

#[async_trait::async_trait]
impl<AR, H> LoginUseCase for LoginUseCaseImpl<AR, H>
where
    AR: AccountRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    async fn login(&self, email: &str, password: &str) -> ServiceResult<AccountView> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return ServiceError::invalid_input("email", "Email and password required");
        }
        let account = match self.account_repository.get_account_by_email(email).await {
            Ok(account) => account,
            Err(RepoRetrieveError::NotFound) => {
                log::debug!("Login attempt for unknown email {}", email);
                return ServiceError::unauthorized("Invalid credentials");
            }
            Err(RepoRetrieveError::StorageError(e)) => {
                return Err(storage_failure("Looking up account for login", e));
            }
        };
        if !self
            .password_hasher
            .verify(password, &account.password_hash)
        {
            log::debug!("Wrong password for account {}", account.account_id);
            return ServiceError::unauthorized("Invalid credentials");
        }
        Ok(account.into())
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{MockAccountRepository, PlainPasswordHasher, account};

    use super::*;

    #[tokio::test]
    async fn test_login_by_email() {
        let repo = Arc::new(MockAccountRepository::default());
        let stored = account("saban", "nick@bama.edu", "rolltide");
        repo.insert(stored.clone());
        let use_case = LoginUseCaseImpl::new(repo.clone(), Arc::new(PlainPasswordHasher));

        let view = use_case.login("nick@bama.edu", "rolltide").await.unwrap();
        assert_eq!(view.account_id, stored.account_id);

        assert!(matches!(
            use_case.login("nick@bama.edu", "geaux").await,
            Err(ServiceError::Unauthorized(_))
        ));
        assert!(matches!(
            use_case.login("nobody@bama.edu", "rolltide").await,
            Err(ServiceError::Unauthorized(_))
        ));
    }
}
