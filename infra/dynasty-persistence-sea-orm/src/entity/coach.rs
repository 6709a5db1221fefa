use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "coaches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub coach_id: Uuid,
    pub dynasty_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub college: String,
    pub position: String,
    pub current_year: i32,
    /// The season list, embedded as a JSON array ordered by year.
    pub seasons: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
