use chrono::{DateTime, Utc};
use validator::Validate;

use crate::{
    domain::{AccountId, DynastyId, RepoCreateError, RepoRetrieveError, RepoUpdateError},
    error::{ServiceError, ServiceResult},
};

#[async_trait::async_trait]
pub trait AccountRepository {
    /// Fails with `Conflict` when the username or email is already taken.
    async fn create_account(&self, account: &Account) -> Result<(), RepoCreateError>;
    async fn get_account(&self, account_id: AccountId) -> Result<Account, RepoRetrieveError>;
    async fn get_account_by_email(&self, email: &str) -> Result<Account, RepoRetrieveError>;
    async fn get_account_by_username(&self, username: &str)
    -> Result<Account, RepoRetrieveError>;
    async fn update_account(&self, account: &Account) -> Result<(), RepoUpdateError>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Account {
    pub account_id: AccountId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub favorite_team: String,
    pub dynasty_ids: Vec<DynastyId>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            account_id: AccountId::new(),
            username,
            email,
            password_hash,
            favorite_team: String::new(),
            dynasty_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn add_dynasty(&mut self, dynasty_id: DynastyId) {
        if !self.dynasty_ids.contains(&dynasty_id) {
            self.dynasty_ids.push(dynasty_id);
        }
    }

    pub fn remove_dynasty(&mut self, dynasty_id: DynastyId) {
        self.dynasty_ids.retain(|id| *id != dynasty_id);
    }
}

pub trait PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, String>;
    fn verify(&self, password: &str, password_hash: &str) -> bool;
}

pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, String> {
        bcrypt::hash(password, self.cost).map_err(|e| e.to_string())
    }

    fn verify(&self, password: &str, password_hash: &str) -> bool {
        bcrypt::verify(password, password_hash).unwrap_or(false)
    }
}

#[derive(Validate)]
struct Credentials {
    #[validate(length(min = 3, max = 32))]
    username: String,
    #[validate(email)]
    email: String,
    #[validate(length(min = 6, max = 128))]
    password: String,
}

/// Checked registration fields, trimmed.
pub struct ValidRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
) -> ServiceResult<ValidRegistration> {
    let credentials = Credentials {
        username: username.trim().to_string(),
        email: email.trim().to_string(),
        password: password.to_string(),
    };
    if let Err(errors) = credentials.validate() {
        let field_errors = errors.field_errors();
        for field in ["username", "email", "password"] {
            if field_errors.contains_key(field) {
                return ServiceError::invalid_input(field, invalid_message(field));
            }
        }
        return ServiceError::invalid_input("username", errors.to_string());
    }
    Ok(ValidRegistration {
        username: credentials.username,
        email: credentials.email,
        password: credentials.password,
    })
}

pub fn validate_username(username: &str) -> ServiceResult<String> {
    let username = username.trim();
    let length = username.chars().count();
    if !(3..=32).contains(&length) {
        return ServiceError::invalid_input("username", invalid_message("username"));
    }
    Ok(username.to_string())
}

pub fn validate_password(password: &str) -> ServiceResult<()> {
    let length = password.chars().count();
    if !(6..=128).contains(&length) {
        return ServiceError::invalid_input("password", invalid_message("password"));
    }
    Ok(())
}

fn invalid_message(field: &str) -> &'static str {
    match field {
        "username" => "Username must be between 3 and 32 characters",
        "email" => "Email must be a valid address",
        _ => "Password must be between 6 and 128 characters",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_registration() {
        let valid = validate_registration(" coach_k ", "k@duke.edu ", "hunter22").unwrap();
        assert_eq!(valid.username, "coach_k");
        assert_eq!(valid.email, "k@duke.edu");

        let bad_email = validate_registration("coach_k", "not-an-email", "hunter22");
        assert!(matches!(bad_email, Err(e) if e.field() == Some("email")));

        let short_name = validate_registration("ab", "k@duke.edu", "hunter22");
        assert!(matches!(short_name, Err(e) if e.field() == Some("username")));

        let short_password = validate_registration("coach_k", "k@duke.edu", "abc");
        assert!(matches!(short_password, Err(e) if e.field() == Some("password")));
    }

    #[test]
    fn test_bcrypt_round_trip() {
        let hasher = BcryptPasswordHasher::new(4);
        let hash = hasher.hash("hunter22").unwrap();
        assert!(hasher.verify("hunter22", &hash));
        assert!(!hasher.verify("hunter23", &hash));
        assert!(!hasher.verify("hunter22", "not a hash"));
    }
}
