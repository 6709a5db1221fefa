use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{AccountId, DynastyId, RepoCreateError, RepoError, RepoRetrieveError, RepoUpdateError};

#[async_trait::async_trait]
pub trait DynastyRepository {
    async fn create_dynasty(&self, dynasty: &Dynasty) -> Result<(), RepoCreateError>;
    async fn get_dynasty(&self, dynasty_id: DynastyId) -> Result<Dynasty, RepoRetrieveError>;
    /// Dynasties owned by or shared with the account, newest first.
    async fn list_dynasties_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Dynasty>, RepoError>;
    async fn update_dynasty(&self, dynasty: &Dynasty) -> Result<(), RepoUpdateError>;
    async fn delete_dynasty(&self, dynasty_id: DynastyId) -> Result<(), RepoError>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dynasty {
    pub dynasty_id: DynastyId,
    pub owner_id: AccountId,
    pub name: String,
    pub start_date: NaiveDate,
    pub current_year: i32,
    pub shared_with: Vec<AccountId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Dynasty {
    pub fn new(owner_id: AccountId, name: String, start_date: NaiveDate, current_year: i32) -> Self {
        let now = Utc::now();
        Self {
            dynasty_id: DynastyId::new(),
            owner_id,
            name,
            start_date,
            current_year,
            shared_with: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owner(&self, account_id: AccountId) -> bool {
        self.owner_id == account_id
    }

    pub fn is_member(&self, account_id: AccountId) -> bool {
        self.is_owner(account_id) || self.shared_with.contains(&account_id)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
