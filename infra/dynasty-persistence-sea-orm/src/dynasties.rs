use std::collections::HashMap;

use dynasty_server_app::domain::{
    AccountId, DynastyId, RepoCreateError, RepoError, RepoRetrieveError, RepoUpdateError,
    dynasty::{Dynasty, DynastyRepository},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Set, TransactionError, TransactionTrait,
};

use crate::{
    create_db_pool,
    entity::{dynasty, dynasty_access},
    is_unique_violation,
};

pub struct DynastyRepositoryImpl {
    db: DatabaseConnection,
}

impl DynastyRepositoryImpl {
    pub async fn new() -> Self {
        let db = create_db_pool().await;
        Self { db }
    }

    fn model_to_dynasty(model: dynasty::Model, shared_with: Vec<AccountId>) -> Dynasty {
        Dynasty {
            dynasty_id: DynastyId(model.dynasty_id),
            owner_id: AccountId(model.owner_id),
            name: model.name,
            start_date: model.start_date,
            current_year: model.current_year,
            shared_with,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    fn dynasty_to_model(dynasty: &Dynasty) -> dynasty::ActiveModel {
        dynasty::ActiveModel {
            dynasty_id: Set(dynasty.dynasty_id.0),
            owner_id: Set(dynasty.owner_id.0),
            name: Set(dynasty.name.clone()),
            start_date: Set(dynasty.start_date),
            current_year: Set(dynasty.current_year),
            created_at: Set(dynasty.created_at),
            updated_at: Set(dynasty.updated_at),
        }
    }

    /// Shared account ids per dynasty.
    async fn load_access(
        &self,
        dynasty_ids: Vec<uuid::Uuid>,
    ) -> Result<HashMap<uuid::Uuid, Vec<AccountId>>, DbErr> {
        let mut shares: HashMap<uuid::Uuid, Vec<AccountId>> = HashMap::new();
        if dynasty_ids.is_empty() {
            return Ok(shares);
        }
        let rows = dynasty_access::Entity::find()
            .filter(dynasty_access::Column::DynastyId.is_in(dynasty_ids))
            .all(&self.db)
            .await?;
        for row in rows {
            shares
                .entry(row.dynasty_id)
                .or_default()
                .push(AccountId(row.account_id));
        }
        Ok(shares)
    }
}

async fn replace_access<C: ConnectionTrait>(c: &C, dynasty: &Dynasty) -> Result<(), DbErr> {
    dynasty_access::Entity::delete_many()
        .filter(dynasty_access::Column::DynastyId.eq(dynasty.dynasty_id.0))
        .exec(c)
        .await?;
    if dynasty.shared_with.is_empty() {
        return Ok(());
    }
    let rows = dynasty.shared_with.iter().map(|account_id| dynasty_access::ActiveModel {
        dynasty_id: Set(dynasty.dynasty_id.0),
        account_id: Set(account_id.0),
    });
    dynasty_access::Entity::insert_many(rows).exec(c).await?;
    Ok(())
}

#[async_trait::async_trait]
impl DynastyRepository for DynastyRepositoryImpl {
    async fn create_dynasty(&self, dynasty: &Dynasty) -> Result<(), RepoCreateError> {
        let dynasty = dynasty.clone();
        let res = self
            .db
            .transaction::<_, (), DbErr>(|c| {
                Box::pin(async move {
                    Self::dynasty_to_model(&dynasty).insert(c).await?;
                    replace_access(c, &dynasty).await
                })
            })
            .await;
        match res {
            Ok(()) => Ok(()),
            Err(TransactionError::Transaction(e)) if is_unique_violation(&e) => {
                Err(RepoCreateError::Conflict)
            }
            Err(e) => Err(RepoCreateError::StorageError(e.to_string())),
        }
    }

    async fn get_dynasty(&self, dynasty_id: DynastyId) -> Result<Dynasty, RepoRetrieveError> {
        let model = dynasty::Entity::find_by_id(dynasty_id.0)
            .one(&self.db)
            .await
            .map_err(|e| RepoRetrieveError::StorageError(e.to_string()))?
            .ok_or(RepoRetrieveError::NotFound)?;
        let mut shares = self
            .load_access(vec![dynasty_id.0])
            .await
            .map_err(|e| RepoRetrieveError::StorageError(e.to_string()))?;
        let shared_with = shares.remove(&dynasty_id.0).unwrap_or_default();
        Ok(Self::model_to_dynasty(model, shared_with))
    }

    async fn list_dynasties_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Dynasty>, RepoError> {
        let granted: Vec<uuid::Uuid> = dynasty_access::Entity::find()
            .filter(dynasty_access::Column::AccountId.eq(account_id.0))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?
            .into_iter()
            .map(|row| row.dynasty_id)
            .collect();

        let mut visible = Condition::any().add(dynasty::Column::OwnerId.eq(account_id.0));
        if !granted.is_empty() {
            visible = visible.add(dynasty::Column::DynastyId.is_in(granted));
        }
        let models = dynasty::Entity::find()
            .filter(visible)
            .order_by_desc(dynasty::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;

        let mut shares = self
            .load_access(models.iter().map(|m| m.dynasty_id).collect())
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;
        Ok(models
            .into_iter()
            .map(|model| {
                let shared_with = shares.remove(&model.dynasty_id).unwrap_or_default();
                Self::model_to_dynasty(model, shared_with)
            })
            .collect())
    }

    async fn update_dynasty(&self, dynasty: &Dynasty) -> Result<(), RepoUpdateError> {
        let dynasty = dynasty.clone();
        let res = self
            .db
            .transaction::<_, (), DbErr>(|c| {
                Box::pin(async move {
                    Self::dynasty_to_model(&dynasty).update(c).await?;
                    replace_access(c, &dynasty).await
                })
            })
            .await;
        match res {
            Ok(()) => Ok(()),
            Err(TransactionError::Transaction(DbErr::RecordNotUpdated)) => {
                Err(RepoUpdateError::NotFound)
            }
            Err(e) => Err(RepoUpdateError::StorageError(e.to_string())),
        }
    }

    async fn delete_dynasty(&self, dynasty_id: DynastyId) -> Result<(), RepoError> {
        let res = self
            .db
            .transaction::<_, (), DbErr>(|c| {
                Box::pin(async move {
                    dynasty_access::Entity::delete_many()
                        .filter(dynasty_access::Column::DynastyId.eq(dynasty_id.0))
                        .exec(c)
                        .await?;
                    dynasty::Entity::delete_by_id(dynasty_id.0).exec(c).await?;
                    Ok(())
                })
            })
            .await;
        res.map_err(|e| RepoError::StorageError(e.to_string()))
    }
}
