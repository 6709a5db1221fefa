use dynasty_server_app::domain::{
    AccountId, DynastyId, RepoCreateError, RepoRetrieveError, RepoUpdateError,
    account::{Account, AccountRepository},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use crate::{create_db_pool, entity::account, is_unique_violation};

pub struct AccountRepositoryImpl {
    db: DatabaseConnection,
}

impl AccountRepositoryImpl {
    pub async fn new() -> Self {
        let db = create_db_pool().await;
        Self { db }
    }

    fn model_to_account(model: account::Model) -> Account {
        let dynasty_ids = serde_json::from_value::<Vec<uuid::Uuid>>(model.dynasty_ids)
            .unwrap_or_default()
            .into_iter()
            .map(DynastyId)
            .collect();
        Account {
            account_id: AccountId(model.account_id),
            username: model.username,
            email: model.email,
            password_hash: model.password_hash,
            favorite_team: model.favorite_team,
            dynasty_ids,
            created_at: model.created_at,
        }
    }

    fn account_to_model(account: &Account) -> account::ActiveModel {
        let dynasty_ids: Vec<uuid::Uuid> = account.dynasty_ids.iter().map(|id| id.0).collect();
        account::ActiveModel {
            account_id: Set(account.account_id.0),
            username: Set(account.username.clone()),
            email: Set(account.email.clone()),
            password_hash: Set(account.password_hash.clone()),
            favorite_team: Set(account.favorite_team.clone()),
            dynasty_ids: Set(
                serde_json::to_value(dynasty_ids).unwrap_or_else(|_| serde_json::json!([]))
            ),
            created_at: Set(account.created_at),
        }
    }

    async fn find_one(
        &self,
        column: account::Column,
        value: &str,
    ) -> Result<Account, RepoRetrieveError> {
        let model = account::Entity::find()
            .filter(column.eq(value))
            .one(&self.db)
            .await
            .map_err(|e| RepoRetrieveError::StorageError(e.to_string()))?;
        model
            .map(Self::model_to_account)
            .ok_or(RepoRetrieveError::NotFound)
    }
}

#[async_trait::async_trait]
impl AccountRepository for AccountRepositoryImpl {
    async fn create_account(&self, account: &Account) -> Result<(), RepoCreateError> {
        Self::account_to_model(account)
            .insert(&self.db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    RepoCreateError::Conflict
                } else {
                    RepoCreateError::StorageError(e.to_string())
                }
            })?;
        Ok(())
    }

    async fn get_account(&self, account_id: AccountId) -> Result<Account, RepoRetrieveError> {
        let model = account::Entity::find_by_id(account_id.0)
            .one(&self.db)
            .await
            .map_err(|e| RepoRetrieveError::StorageError(e.to_string()))?;
        model
            .map(Self::model_to_account)
            .ok_or(RepoRetrieveError::NotFound)
    }

    async fn get_account_by_email(&self, email: &str) -> Result<Account, RepoRetrieveError> {
        self.find_one(account::Column::Email, email).await
    }

    async fn get_account_by_username(
        &self,
        username: &str,
    ) -> Result<Account, RepoRetrieveError> {
        self.find_one(account::Column::Username, username).await
    }

    async fn update_account(&self, account: &Account) -> Result<(), RepoUpdateError> {
        Self::account_to_model(account)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => RepoUpdateError::NotFound,
                e if is_unique_violation(&e) => RepoUpdateError::Conflict,
                e => RepoUpdateError::StorageError(e.to_string()),
            })?;
        Ok(())
    }
}
