use sea_orm::entity::prelude::*;

/// Accounts other than the owner that were granted access to a dynasty.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "dynasty_access")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub dynasty_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub account_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
