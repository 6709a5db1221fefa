use std::sync::Arc;

use crate::{
    domain::{
        AccountId, CoachId, DynastyId,
        coach::{Coach, CoachRepository},
        dynasty::{Dynasty, DynastyRepository},
    },
    error::{ServiceError, ServiceResult, from_retrieve},
};

/// Resolves dynasties and coaches on behalf of an account, enforcing ownership and sharing.
#[async_trait::async_trait]
pub trait DynastyAccessService {
    async fn member_dynasty(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
    ) -> ServiceResult<Dynasty>;
    async fn owned_dynasty(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
    ) -> ServiceResult<Dynasty>;
    /// The coach must belong to the given dynasty, otherwise it is reported as missing.
    async fn member_coach(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
        coach_id: CoachId,
    ) -> ServiceResult<(Dynasty, Coach)>;
}

pub struct DynastyAccessServiceImpl<D: DynastyRepository, C: CoachRepository> {
    dynasty_repository: Arc<D>,
    coach_repository: Arc<C>,
}

impl<D: DynastyRepository, C: CoachRepository> DynastyAccessServiceImpl<D, C> {
    pub fn new(dynasty_repository: Arc<D>, coach_repository: Arc<C>) -> Self {
        Self {
            dynasty_repository,
            coach_repository,
        }
    }

    async fn load(&self, dynasty_id: DynastyId) -> ServiceResult<Dynasty> {
        self.dynasty_repository
            .get_dynasty(dynasty_id)
            .await
            .map_err(|e| from_retrieve("Loading dynasty", "Dynasty", e))
    }
}

#[async_trait::async_trait]
impl<D, C> DynastyAccessService for DynastyAccessServiceImpl<D, C>
where
    D: DynastyRepository + Send + Sync + 'static,
    C: CoachRepository + Send + Sync + 'static,
{
    async fn member_dynasty(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
    ) -> ServiceResult<Dynasty> {
        let dynasty = self.load(dynasty_id).await?;
        if !dynasty.is_member(account_id) {
            log::debug!("Account {} denied access to dynasty {}", account_id, dynasty_id);
            return ServiceError::forbidden("You do not have access to this dynasty");
        }
        Ok(dynasty)
    }

    async fn owned_dynasty(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
    ) -> ServiceResult<Dynasty> {
        let dynasty = self.load(dynasty_id).await?;
        if !dynasty.is_owner(account_id) {
            log::debug!("Account {} is not the owner of dynasty {}", account_id, dynasty_id);
            return ServiceError::forbidden("Only the owner can do this");
        }
        Ok(dynasty)
    }

    async fn member_coach(
        &self,
        account_id: AccountId,
        dynasty_id: DynastyId,
        coach_id: CoachId,
    ) -> ServiceResult<(Dynasty, Coach)> {
        let dynasty = self.member_dynasty(account_id, dynasty_id).await?;
        let coach = self
            .coach_repository
            .get_coach(coach_id)
            .await
            .map_err(|e| from_retrieve("Loading coach", "Coach", e))?;
        if coach.dynasty_id != dynasty_id {
            return ServiceError::not_found("Coach not found");
        }
        Ok((dynasty, coach))
    }
}
