use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "dynasties")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub dynasty_id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub start_date: Date,
    pub current_year: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
