use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completion: f32,
    #[sea_orm(indexed)]
    pub expiry: DateTimeWithTimeZone,
    #[sea_orm(default_value = false)]
    pub is_done: bool,
}

impl ActiveModelBehavior for ActiveModel {}
