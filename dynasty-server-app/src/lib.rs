use std::sync::Arc;

use crate::{
    domain::{
        account::{AccountRepository, PasswordHasher},
        coach::CoachRepository,
        dynasty::DynastyRepository,
    },
    services::dynasty_access::DynastyAccessServiceImpl,
    workflow::{
        account::{
            change_password::{ChangePasswordUseCase, ChangePasswordUseCaseImpl},
            change_username::{ChangeUsernameUseCase, ChangeUsernameUseCaseImpl},
            favorite_team::{FavoriteTeamUseCase, FavoriteTeamUseCaseImpl},
            get_account::{GetAccountUseCase, GetAccountUseCaseImpl},
            login::{LoginUseCase, LoginUseCaseImpl},
            register::{RegisterAccountUseCase, RegisterAccountUseCaseImpl},
        },
        coach::{
            create::{CreateCoachUseCase, CreateCoachUseCaseImpl},
            delete::{DeleteCoachUseCase, DeleteCoachUseCaseImpl},
            get::{GetCoachUseCase, GetCoachUseCaseImpl},
            list::{ListCoachesUseCase, ListCoachesUseCaseImpl},
            update::{UpdateCoachUseCase, UpdateCoachUseCaseImpl},
        },
        dynasty::{
            create::{CreateDynastyUseCase, CreateDynastyUseCaseImpl},
            delete::{DeleteDynastyUseCase, DeleteDynastyUseCaseImpl},
            get::{GetDynastyUseCase, GetDynastyUseCaseImpl},
            list::{ListDynastiesUseCase, ListDynastiesUseCaseImpl},
            share::{ShareDynastyUseCase, ShareDynastyUseCaseImpl},
            update::{UpdateDynastyUseCase, UpdateDynastyUseCaseImpl},
        },
        season::{
            advance::{AdvanceSeasonUseCase, AdvanceSeasonUseCaseImpl},
            rollback::{RollbackSeasonUseCase, RollbackSeasonUseCaseImpl},
            toggle::{ToggleSeasonEditUseCase, ToggleSeasonEditUseCaseImpl},
            update::{UpdateSeasonUseCase, UpdateSeasonUseCaseImpl},
        },
    },
};

pub mod domain;
pub mod error;
pub mod services;
pub mod workflow;

#[cfg(test)]
mod testing;

pub use error::{ServiceError, ServiceResult};

pub struct Application {
    pub account_register_use_case: Box<dyn RegisterAccountUseCase + Send + Sync + 'static>,
    pub account_login_use_case: Box<dyn LoginUseCase + Send + Sync + 'static>,
    pub account_get_use_case: Box<dyn GetAccountUseCase + Send + Sync + 'static>,
    pub account_favorite_team_use_case: Box<dyn FavoriteTeamUseCase + Send + Sync + 'static>,
    pub account_change_username_use_case: Box<dyn ChangeUsernameUseCase + Send + Sync + 'static>,
    pub account_change_password_use_case: Box<dyn ChangePasswordUseCase + Send + Sync + 'static>,

    pub dynasty_list_use_case: Box<dyn ListDynastiesUseCase + Send + Sync + 'static>,
    pub dynasty_create_use_case: Box<dyn CreateDynastyUseCase + Send + Sync + 'static>,
    pub dynasty_get_use_case: Box<dyn GetDynastyUseCase + Send + Sync + 'static>,
    pub dynasty_update_use_case: Box<dyn UpdateDynastyUseCase + Send + Sync + 'static>,
    pub dynasty_delete_use_case: Box<dyn DeleteDynastyUseCase + Send + Sync + 'static>,
    pub dynasty_share_use_case: Box<dyn ShareDynastyUseCase + Send + Sync + 'static>,

    pub coach_list_use_case: Box<dyn ListCoachesUseCase + Send + Sync + 'static>,
    pub coach_get_use_case: Box<dyn GetCoachUseCase + Send + Sync + 'static>,
    pub coach_create_use_case: Box<dyn CreateCoachUseCase + Send + Sync + 'static>,
    pub coach_update_use_case: Box<dyn UpdateCoachUseCase + Send + Sync + 'static>,
    pub coach_delete_use_case: Box<dyn DeleteCoachUseCase + Send + Sync + 'static>,

    pub season_advance_use_case: Box<dyn AdvanceSeasonUseCase + Send + Sync + 'static>,
    pub season_rollback_use_case: Box<dyn RollbackSeasonUseCase + Send + Sync + 'static>,
    pub season_update_use_case: Box<dyn UpdateSeasonUseCase + Send + Sync + 'static>,
    pub season_toggle_edit_use_case: Box<dyn ToggleSeasonEditUseCase + Send + Sync + 'static>,
}

pub fn build_application<
    AR: AccountRepository + Send + Sync + 'static,
    D: DynastyRepository + Send + Sync + 'static,
    C: CoachRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
>(
    account_repository: Arc<AR>,
    dynasty_repository: Arc<D>,
    coach_repository: Arc<C>,
    password_hasher: Arc<H>,
) -> Application {
    let dynasty_access = Arc::new(DynastyAccessServiceImpl::new(
        dynasty_repository.clone(),
        coach_repository.clone(),
    ));

    Application {
        account_register_use_case: Box::new(RegisterAccountUseCaseImpl::new(
            account_repository.clone(),
            password_hasher.clone(),
        )),
        account_login_use_case: Box::new(LoginUseCaseImpl::new(
            account_repository.clone(),
            password_hasher.clone(),
        )),
        account_get_use_case: Box::new(GetAccountUseCaseImpl::new(account_repository.clone())),
        account_favorite_team_use_case: Box::new(FavoriteTeamUseCaseImpl::new(
            account_repository.clone(),
        )),
        account_change_username_use_case: Box::new(ChangeUsernameUseCaseImpl::new(
            account_repository.clone(),
        )),
        account_change_password_use_case: Box::new(ChangePasswordUseCaseImpl::new(
            account_repository.clone(),
            password_hasher.clone(),
        )),

        dynasty_list_use_case: Box::new(ListDynastiesUseCaseImpl::new(dynasty_repository.clone())),
        dynasty_create_use_case: Box::new(CreateDynastyUseCaseImpl::new(
            dynasty_repository.clone(),
            account_repository.clone(),
        )),
        dynasty_get_use_case: Box::new(GetDynastyUseCaseImpl::new(dynasty_access.clone())),
        dynasty_update_use_case: Box::new(UpdateDynastyUseCaseImpl::new(
            dynasty_access.clone(),
            dynasty_repository.clone(),
        )),
        dynasty_delete_use_case: Box::new(DeleteDynastyUseCaseImpl::new(
            dynasty_access.clone(),
            dynasty_repository.clone(),
            coach_repository.clone(),
            account_repository.clone(),
        )),
        dynasty_share_use_case: Box::new(ShareDynastyUseCaseImpl::new(
            dynasty_access.clone(),
            dynasty_repository.clone(),
            account_repository.clone(),
        )),

        coach_list_use_case: Box::new(ListCoachesUseCaseImpl::new(
            dynasty_access.clone(),
            coach_repository.clone(),
        )),
        coach_get_use_case: Box::new(GetCoachUseCaseImpl::new(dynasty_access.clone())),
        coach_create_use_case: Box::new(CreateCoachUseCaseImpl::new(
            dynasty_access.clone(),
            coach_repository.clone(),
        )),
        coach_update_use_case: Box::new(UpdateCoachUseCaseImpl::new(
            dynasty_access.clone(),
            coach_repository.clone(),
        )),
        coach_delete_use_case: Box::new(DeleteCoachUseCaseImpl::new(
            dynasty_access.clone(),
            coach_repository.clone(),
        )),

        season_advance_use_case: Box::new(AdvanceSeasonUseCaseImpl::new(
            dynasty_access.clone(),
            dynasty_repository.clone(),
            coach_repository.clone(),
        )),
        season_rollback_use_case: Box::new(RollbackSeasonUseCaseImpl::new(
            dynasty_access.clone(),
            dynasty_repository.clone(),
            coach_repository.clone(),
        )),
        season_update_use_case: Box::new(UpdateSeasonUseCaseImpl::new(
            dynasty_access.clone(),
            coach_repository.clone(),
        )),
        season_toggle_edit_use_case: Box::new(ToggleSeasonEditUseCaseImpl::new(
            dynasty_access,
            coach_repository,
        )),
    }
}
