use std::sync::Arc;

use crate::{
    domain::{
        AccountId,
        account::{AccountRepository, PasswordHasher, validate_password},
    },
    error::{ServiceError, ServiceResult, from_retrieve, from_update, storage_failure},
};

#[async_trait::async_trait]
pub trait ChangePasswordUseCase {
    async fn change_password(
        &self,
        account_id: AccountId,
        old_password: &str,
        new_password: &str,
    ) -> ServiceResult<()>;
}

pub struct ChangePasswordUseCaseImpl<AR: AccountRepository, H: PasswordHasher> {
    account_repository: Arc<AR>,
    password_hasher: Arc<H>,
}

impl<AR: AccountRepository, H: PasswordHasher> ChangePasswordUseCaseImpl<AR, H> {
    pub fn new(account_repository: Arc<AR>, password_hasher: Arc<H>) -> Self {
        Self {
            account_repository,
            password_hasher,
        }
    }
}

#[async_trait::async_trait]
impl<AR, H> ChangePasswordUseCase for ChangePasswordUseCaseImpl<AR, H>
where
    AR: AccountRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    async fn change_password(
        &self,
        account_id: AccountId,
        old_password: &str,
        new_password: &str,
    ) -> ServiceResult<()> {
        if old_password.is_empty() {
            return ServiceError::invalid_input("oldPassword", "Old password required");
        }
        validate_password(new_password)?;

        let mut account = self
            .account_repository
            .get_account(account_id)
            .await
            .map_err(|e| from_retrieve("Loading account", "User", e))?;
        if !self
            .password_hasher
            .verify(old_password, &account.password_hash)
        {
            log::warn!("Rejected password change for account {}", account_id);
            return ServiceError::unauthorized("Old password is incorrect");
        }

        account.password_hash = self
            .password_hasher
            .hash(new_password)
            .map_err(|e| storage_failure("Hashing password", e))?;
        self.account_repository
            .update_account(&account)
            .await
            .map_err(|e| from_update("Saving password", "User", e))?;
        log::info!("Password changed for account {}", account_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{MockAccountRepository, PlainPasswordHasher, account};

    use super::*;

    #[tokio::test]
    async fn test_change_password_requires_old_password() {
        let repo = Arc::new(MockAccountRepository::default());
        let stored = account("saban", "nick@bama.edu", "rolltide");
        repo.insert(stored.clone());
        let use_case = ChangePasswordUseCaseImpl::new(repo.clone(), Arc::new(PlainPasswordHasher));

        assert!(matches!(
            use_case
                .change_password(stored.account_id, "wrong", "newsecret")
                .await,
            Err(ServiceError::Unauthorized(_))
        ));
        use_case
            .change_password(stored.account_id, "rolltide", "newsecret")
            .await
            .unwrap();
        let updated = repo.get_account(stored.account_id).await.unwrap();
        assert_eq!(updated.password_hash, "hashed:newsecret");
    }
}
