use std::sync::Arc;

use dynasty_core::{Career, Position, required_text};

use crate::{
    domain::{
        AccountId, DynastyId, RepoCreateError,
        coach::{Coach, CoachRepository, MAX_COACHES_PER_DYNASTY},
    },
    error::{ServiceError, ServiceResult, from_repo, storage_failure},
    services::dynasty_access::DynastyAccessService,
    workflow::coach::CoachView,
};

pub struct NewCoach {
    pub first_name: String,
    pub last_name: String,
    pub college: String,
    pub position: String,
}

#[async_trait::async_trait]
pub trait CreateCoachUseCase {
    /// The coach starts with one open season in the dynasty's current year.
    async fn create_coach(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
        new_coach: NewCoach,
    ) -> ServiceResult<CoachView>;
}

pub struct CreateCoachUseCaseImpl<A: DynastyAccessService, C: CoachRepository> {
    dynasty_access: Arc<A>,
    coach_repository: Arc<C>,
}

impl<A: DynastyAccessService, C: CoachRepository> CreateCoachUseCaseImpl<A, C> {
    pub fn new(dynasty_access: Arc<A>, coach_repository: Arc<C>) -> Self {
        Self {
            dynasty_access,
            coach_repository,
        }
    }
}

#[async_trait::async_trait]
impl<A, C> CreateCoachUseCase for CreateCoachUseCaseImpl<A, C>
where
    A: DynastyAccessService + Send + Sync + 'static,
    C: CoachRepository + Send + Sync + 'static,
{
    async fn create_coach(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
        new_coach: NewCoach,
    ) -> ServiceResult<CoachView> {
        let dynasty = self
            .dynasty_access
            .member_dynasty(account_id, dynasty_id)
            .await?;

        let first_name = required_text("firstName", &new_coach.first_name)?;
        let last_name = required_text("lastName", &new_coach.last_name)?;
        let position: Position = new_coach.position.parse()?;
        let career = Career::start(dynasty.current_year, &new_coach.college, position)?;

        let roster = self
            .coach_repository
            .count_coaches(dynasty_id)
            .await
            .map_err(|e| from_repo("Counting coaches", e))?;
        if roster >= MAX_COACHES_PER_DYNASTY {
            return ServiceError::limit_exceeded(format!(
                "Maximum number of coaches ({}) reached for this dynasty",
                MAX_COACHES_PER_DYNASTY
            ));
        }

        let coach = Coach::new(dynasty_id, first_name, last_name, career);
        match self.coach_repository.create_coach(&coach).await {
            Ok(()) => {}
            Err(RepoCreateError::Conflict) => return ServiceError::conflict("Coach already exists"),
            Err(RepoCreateError::StorageError(e)) => {
                return Err(storage_failure("Creating coach", e));
            }
        }
        log::info!(
            "Coach {} {} ({}) added to dynasty {}",
            coach.first_name,
            coach.last_name,
            coach.coach_id,
            dynasty_id
        );
        Ok(coach.into())
    }
}
