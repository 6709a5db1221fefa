//! In-memory repositories for use case tests.

use std::sync::Arc;

use chrono::NaiveDate;
use dashmap::{DashMap, DashSet};
use dynasty_core::{Career, Position};

use crate::{
    domain::{
        AccountId, CoachId, DynastyId, RepoCreateError, RepoError, RepoRetrieveError,
        RepoUpdateError,
        account::{Account, AccountRepository, PasswordHasher},
        coach::{Coach, CoachRepository},
        dynasty::{Dynasty, DynastyRepository},
    },
    services::dynasty_access::DynastyAccessServiceImpl,
};

pub fn account(username: &str, email: &str, password: &str) -> Account {
    Account::new(
        username.to_string(),
        email.to_string(),
        format!("hashed:{}", password),
    )
}

/// A head coach at Alabama with a single season in `year`.
pub fn coach(dynasty_id: DynastyId, year: i32) -> Coach {
    let career = Career::start(year, "Alabama", Position::HeadCoach).expect("valid career");
    Coach::new(dynasty_id, "Nick".to_string(), "Saban".to_string(), career)
}

/// One owner, one dynasty, empty roster.
pub struct Fixture {
    pub accounts: Arc<MockAccountRepository>,
    pub dynasties: Arc<MockDynastyRepository>,
    pub coaches: Arc<MockCoachRepository>,
    pub access: Arc<DynastyAccessServiceImpl<MockDynastyRepository, MockCoachRepository>>,
    pub owner: Account,
    pub dynasty: Dynasty,
}

impl Fixture {
    pub fn new(year: i32) -> Self {
        let accounts = Arc::new(MockAccountRepository::default());
        let dynasties = Arc::new(MockDynastyRepository::default());
        let coaches = Arc::new(MockCoachRepository::default());
        let access = Arc::new(DynastyAccessServiceImpl::new(
            dynasties.clone(),
            coaches.clone(),
        ));
        let owner = account("saban", "nick@bama.edu", "rolltide");
        accounts.insert(owner.clone());
        let dynasty = Dynasty::new(
            owner.account_id,
            "Bama".to_string(),
            NaiveDate::from_ymd_opt(year, 8, 1).expect("valid date"),
            year,
        );
        dynasties.insert(dynasty.clone());
        Self {
            accounts,
            dynasties,
            coaches,
            access,
            owner,
            dynasty,
        }
    }

    pub fn add_coach(&self) -> Coach {
        let coach = coach(self.dynasty.dynasty_id, self.dynasty.current_year);
        self.coaches.insert(coach.clone());
        coach
    }
}

pub struct PlainPasswordHasher;

impl PasswordHasher for PlainPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, String> {
        Ok(format!("hashed:{}", password))
    }

    fn verify(&self, password: &str, password_hash: &str) -> bool {
        password_hash == format!("hashed:{}", password)
    }
}

#[derive(Default)]
pub struct MockAccountRepository {
    accounts: DashMap<AccountId, Account>,
}

impl MockAccountRepository {
    pub fn insert(&self, account: Account) {
        self.accounts.insert(account.account_id, account);
    }

    fn find(&self, predicate: impl Fn(&Account) -> bool) -> Result<Account, RepoRetrieveError> {
        self.accounts
            .iter()
            .find(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .ok_or(RepoRetrieveError::NotFound)
    }
}

#[async_trait::async_trait]
impl AccountRepository for MockAccountRepository {
    async fn create_account(&self, account: &Account) -> Result<(), RepoCreateError> {
        let taken = self.accounts.iter().any(|entry| {
            entry.username == account.username || entry.email == account.email
        });
        if taken {
            return Err(RepoCreateError::Conflict);
        }
        self.insert(account.clone());
        Ok(())
    }

    async fn get_account(&self, account_id: AccountId) -> Result<Account, RepoRetrieveError> {
        self.accounts
            .get(&account_id)
            .map(|entry| entry.clone())
            .ok_or(RepoRetrieveError::NotFound)
    }

    async fn get_account_by_email(&self, email: &str) -> Result<Account, RepoRetrieveError> {
        self.find(|account| account.email == email)
    }

    async fn get_account_by_username(
        &self,
        username: &str,
    ) -> Result<Account, RepoRetrieveError> {
        self.find(|account| account.username == username)
    }

    async fn update_account(&self, account: &Account) -> Result<(), RepoUpdateError> {
        if !self.accounts.contains_key(&account.account_id) {
            return Err(RepoUpdateError::NotFound);
        }
        self.insert(account.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MockDynastyRepository {
    dynasties: DashMap<DynastyId, Dynasty>,
}

impl MockDynastyRepository {
    pub fn insert(&self, dynasty: Dynasty) {
        self.dynasties.insert(dynasty.dynasty_id, dynasty);
    }

    pub fn current_year(&self, dynasty_id: DynastyId) -> Option<i32> {
        self.dynasties.get(&dynasty_id).map(|d| d.current_year)
    }
}

#[async_trait::async_trait]
impl DynastyRepository for MockDynastyRepository {
    async fn create_dynasty(&self, dynasty: &Dynasty) -> Result<(), RepoCreateError> {
        self.insert(dynasty.clone());
        Ok(())
    }

    async fn get_dynasty(&self, dynasty_id: DynastyId) -> Result<Dynasty, RepoRetrieveError> {
        self.dynasties
            .get(&dynasty_id)
            .map(|entry| entry.clone())
            .ok_or(RepoRetrieveError::NotFound)
    }

    async fn list_dynasties_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Dynasty>, RepoError> {
        let mut dynasties: Vec<Dynasty> = self
            .dynasties
            .iter()
            .filter(|entry| entry.is_member(account_id))
            .map(|entry| entry.clone())
            .collect();
        dynasties.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(dynasties)
    }

    async fn update_dynasty(&self, dynasty: &Dynasty) -> Result<(), RepoUpdateError> {
        if !self.dynasties.contains_key(&dynasty.dynasty_id) {
            return Err(RepoUpdateError::NotFound);
        }
        self.insert(dynasty.clone());
        Ok(())
    }

    async fn delete_dynasty(&self, dynasty_id: DynastyId) -> Result<(), RepoError> {
        self.dynasties.remove(&dynasty_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockCoachRepository {
    coaches: DashMap<CoachId, Coach>,
    failing: DashSet<CoachId>,
}

impl MockCoachRepository {
    pub fn insert(&self, coach: Coach) {
        self.coaches.insert(coach.coach_id, coach);
    }

    pub fn get(&self, coach_id: CoachId) -> Option<Coach> {
        self.coaches.get(&coach_id).map(|entry| entry.clone())
    }

    /// Makes every later write of this coach fail with a storage error.
    pub fn fail_writes_for(&self, coach_id: CoachId) {
        self.failing.insert(coach_id);
    }
}

#[async_trait::async_trait]
impl CoachRepository for MockCoachRepository {
    async fn create_coach(&self, coach: &Coach) -> Result<(), RepoCreateError> {
        self.insert(coach.clone());
        Ok(())
    }

    async fn get_coach(&self, coach_id: CoachId) -> Result<Coach, RepoRetrieveError> {
        self.get(coach_id).ok_or(RepoRetrieveError::NotFound)
    }

    async fn list_coaches(&self, dynasty_id: DynastyId) -> Result<Vec<Coach>, RepoError> {
        let mut coaches: Vec<Coach> = self
            .coaches
            .iter()
            .filter(|entry| entry.dynasty_id == dynasty_id)
            .map(|entry| entry.clone())
            .collect();
        coaches.sort_by_key(|c| c.created_at);
        Ok(coaches)
    }

    async fn count_coaches(&self, dynasty_id: DynastyId) -> Result<usize, RepoError> {
        Ok(self
            .coaches
            .iter()
            .filter(|entry| entry.dynasty_id == dynasty_id)
            .count())
    }

    async fn save_coach(&self, coach: &Coach) -> Result<(), RepoUpdateError> {
        if self.failing.contains(&coach.coach_id) {
            return Err(RepoUpdateError::StorageError("disk on fire".to_string()));
        }
        if !self.coaches.contains_key(&coach.coach_id) {
            return Err(RepoUpdateError::NotFound);
        }
        self.insert(coach.clone());
        Ok(())
    }

    async fn delete_coach(&self, coach_id: CoachId) -> Result<(), RepoError> {
        if self.failing.contains(&coach_id) {
            return Err(RepoError::StorageError("disk on fire".to_string()));
        }
        self.coaches.remove(&coach_id);
        Ok(())
    }

    async fn delete_coaches_of_dynasty(&self, dynasty_id: DynastyId) -> Result<(), RepoError> {
        self.coaches.retain(|_, coach| coach.dynasty_id != dynasty_id);
        Ok(())
    }
}
