use dynasty_core::{Career, Position};
use dynasty_server_app::domain::{
    CoachId, DynastyId, RepoCreateError, RepoError, RepoRetrieveError, RepoUpdateError,
    coach::{Coach, CoachRepository},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::{
    create_db_pool,
    entity::coach,
    is_unique_violation,
    season_document::{seasons_from_json, seasons_to_json},
};

pub struct CoachRepositoryImpl {
    db: DatabaseConnection,
}

impl CoachRepositoryImpl {
    pub async fn new() -> Self {
        let db = create_db_pool().await;
        Self { db }
    }

    fn model_to_coach(model: coach::Model) -> Result<Coach, String> {
        let position: Position = model.position.parse().map_err(|e| format!("{}", e))?;
        let seasons = seasons_from_json(model.seasons)?;
        let career = Career::from_parts(model.current_year, model.college, position, seasons)
            .map_err(|e| format!("{}", e))?;
        Ok(Coach {
            coach_id: CoachId(model.coach_id),
            dynasty_id: DynastyId(model.dynasty_id),
            first_name: model.first_name,
            last_name: model.last_name,
            career,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    fn coach_to_model(coach: &Coach) -> coach::ActiveModel {
        coach::ActiveModel {
            coach_id: Set(coach.coach_id.0),
            dynasty_id: Set(coach.dynasty_id.0),
            first_name: Set(coach.first_name.clone()),
            last_name: Set(coach.last_name.clone()),
            college: Set(coach.career.college().to_string()),
            position: Set(coach.career.position().code().to_string()),
            current_year: Set(coach.career.current_year()),
            seasons: Set(seasons_to_json(coach.career.seasons())),
            created_at: Set(coach.created_at),
            updated_at: Set(coach.updated_at),
        }
    }

    fn corrupt(coach_id: uuid::Uuid, e: String) -> String {
        log::error!("Stored coach {} could not be read: {}", coach_id, e);
        format!("corrupt coach record {}", coach_id)
    }
}

#[async_trait::async_trait]
impl CoachRepository for CoachRepositoryImpl {
    async fn create_coach(&self, coach: &Coach) -> Result<(), RepoCreateError> {
        Self::coach_to_model(coach)
            .insert(&self.db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    RepoCreateError::Conflict
                } else {
                    RepoCreateError::StorageError(e.to_string())
                }
            })?;
        Ok(())
    }

    async fn get_coach(&self, coach_id: CoachId) -> Result<Coach, RepoRetrieveError> {
        let model = coach::Entity::find_by_id(coach_id.0)
            .one(&self.db)
            .await
            .map_err(|e| RepoRetrieveError::StorageError(e.to_string()))?
            .ok_or(RepoRetrieveError::NotFound)?;
        Self::model_to_coach(model)
            .map_err(|e| RepoRetrieveError::StorageError(Self::corrupt(coach_id.0, e)))
    }

    async fn list_coaches(&self, dynasty_id: DynastyId) -> Result<Vec<Coach>, RepoError> {
        let models = coach::Entity::find()
            .filter(coach::Column::DynastyId.eq(dynasty_id.0))
            .order_by_asc(coach::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;
        models
            .into_iter()
            .map(|model| {
                let coach_id = model.coach_id;
                Self::model_to_coach(model)
                    .map_err(|e| RepoError::StorageError(Self::corrupt(coach_id, e)))
            })
            .collect()
    }

    async fn count_coaches(&self, dynasty_id: DynastyId) -> Result<usize, RepoError> {
        let count = coach::Entity::find()
            .filter(coach::Column::DynastyId.eq(dynasty_id.0))
            .count(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;
        Ok(count as usize)
    }

    async fn save_coach(&self, coach: &Coach) -> Result<(), RepoUpdateError> {
        Self::coach_to_model(coach)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => RepoUpdateError::NotFound,
                e => RepoUpdateError::StorageError(e.to_string()),
            })?;
        Ok(())
    }

    async fn delete_coach(&self, coach_id: CoachId) -> Result<(), RepoError> {
        coach::Entity::delete_by_id(coach_id.0)
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;
        Ok(())
    }

    async fn delete_coaches_of_dynasty(&self, dynasty_id: DynastyId) -> Result<(), RepoError> {
        coach::Entity::delete_many()
            .filter(coach::Column::DynastyId.eq(dynasty_id.0))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;
        Ok(())
    }
}
