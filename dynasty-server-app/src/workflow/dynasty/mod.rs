use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{AccountId, DynastyId, dynasty::Dynasty};

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod share;
pub mod update;

#[derive(Clone, Debug, PartialEq)]
pub struct DynastyView {
    pub dynasty_id: DynastyId,
    pub owner_id: AccountId,
    pub name: String,
    pub start_date: NaiveDate,
    pub current_year: i32,
    pub shared_with: Vec<AccountId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Dynasty> for DynastyView {
    fn from(dynasty: Dynasty) -> Self {
        Self {
            dynasty_id: dynasty.dynasty_id,
            owner_id: dynasty.owner_id,
            name: dynasty.name,
            start_date: dynasty.start_date,
            current_year: dynasty.current_year,
            shared_with: dynasty.shared_with,
            created_at: dynasty.created_at,
            updated_at: dynasty.updated_at,
        }
    }
}

pub(crate) fn dynasty_name(name: &str) -> crate::error::ServiceResult<String> {
    Ok(dynasty_core::required_text("name", name)?)
}
