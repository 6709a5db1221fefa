use std::sync::Arc;

use dynasty_core::{Position, required_text};

use crate::{
    domain::{AccountId, CoachId, DynastyId, coach::CoachRepository},
    error::{ServiceResult, from_update},
    services::dynasty_access::DynastyAccessService,
    workflow::coach::CoachView,
};

#[derive(Default)]
pub struct CoachChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub college: Option<String>,
    pub position: Option<String>,
}

#[async_trait::async_trait]
pub trait UpdateCoachUseCase {
    /// College and position are written through to the current season, which
    /// therefore has to be editable.
    async fn update_coach(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
        coach_id: CoachId,
        changes: CoachChanges,
    ) -> ServiceResult<CoachView>;
}

pub struct UpdateCoachUseCaseImpl<A: DynastyAccessService, C: CoachRepository> {
    dynasty_access: Arc<A>,
    coach_repository: Arc<C>,
}

impl<A: DynastyAccessService, C: CoachRepository> UpdateCoachUseCaseImpl<A, C> {
    pub fn new(dynasty_access: Arc<A>, coach_repository: Arc<C>) -> Self {
        Self {
            dynasty_access,
            coach_repository,
        }
    }
}

#[async_trait::async_trait]
impl<A, C> UpdateCoachUseCase for UpdateCoachUseCaseImpl<A, C>
where
    A: DynastyAccessService + Send + Sync + 'static,
    C: CoachRepository + Send + Sync + 'static,
{
    async fn update_coach(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
        coach_id: CoachId,
        changes: CoachChanges,
    ) -> ServiceResult<CoachView> {
        let first_name = changes
            .first_name
            .as_deref()
            .map(|name| required_text("firstName", name))
            .transpose()?;
        let last_name = changes
            .last_name
            .as_deref()
            .map(|name| required_text("lastName", name))
            .transpose()?;
        let position = changes
            .position
            .as_deref()
            .map(str::parse::<Position>)
            .transpose()?;

        let (_, mut coach) = self
            .dynasty_access
            .member_coach(account_id, dynasty_id, coach_id)
            .await?;
        coach
            .career
            .update_profile(changes.college.as_deref(), position)?;
        if let Some(first_name) = first_name {
            coach.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            coach.last_name = last_name;
        }
        coach.touch();

        self.coach_repository
            .save_coach(&coach)
            .await
            .map_err(|e| from_update("Saving coach", "Coach", e))?;
        Ok(coach.into())
    }
}
