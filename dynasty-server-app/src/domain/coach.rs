use chrono::{DateTime, Utc};
use dynasty_core::Career;

use crate::domain::{CoachId, DynastyId, RepoCreateError, RepoError, RepoRetrieveError, RepoUpdateError};

/// Roster cap. Creation counts the roster before inserting, so two concurrent
/// creates at one below the cap can both succeed.
pub const MAX_COACHES_PER_DYNASTY: usize = 8;

#[async_trait::async_trait]
pub trait CoachRepository {
    async fn create_coach(&self, coach: &Coach) -> Result<(), RepoCreateError>;
    async fn get_coach(&self, coach_id: CoachId) -> Result<Coach, RepoRetrieveError>;
    /// Coaches of a dynasty in creation order.
    async fn list_coaches(&self, dynasty_id: DynastyId) -> Result<Vec<Coach>, RepoError>;
    async fn count_coaches(&self, dynasty_id: DynastyId) -> Result<usize, RepoError>;
    async fn save_coach(&self, coach: &Coach) -> Result<(), RepoUpdateError>;
    async fn delete_coach(&self, coach_id: CoachId) -> Result<(), RepoError>;
    async fn delete_coaches_of_dynasty(&self, dynasty_id: DynastyId) -> Result<(), RepoError>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Coach {
    pub coach_id: CoachId,
    pub dynasty_id: DynastyId,
    pub first_name: String,
    pub last_name: String,
    pub career: Career,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Coach {
    pub fn new(dynasty_id: DynastyId, first_name: String, last_name: String, career: Career) -> Self {
        let now = Utc::now();
        Self {
            coach_id: CoachId::new(),
            dynasty_id,
            first_name,
            last_name,
            career,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
