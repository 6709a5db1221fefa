use chrono::{DateTime, Utc};

use crate::domain::{AccountId, DynastyId, account::Account};

pub mod change_password;
pub mod change_username;
pub mod favorite_team;
pub mod get_account;
pub mod login;
pub mod register;

/// An account as shown to its owner. Never carries the password hash.
#[derive(Clone, Debug, PartialEq)]
pub struct AccountView {
    pub account_id: AccountId,
    pub username: String,
    pub email: String,
    pub favorite_team: String,
    pub dynasty_ids: Vec<DynastyId>,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            account_id: account.account_id,
            username: account.username,
            email: account.email,
            favorite_team: account.favorite_team,
            dynasty_ids: account.dynasty_ids,
            created_at: account.created_at,
        }
    }
}
