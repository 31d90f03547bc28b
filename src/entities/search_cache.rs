use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "web_search_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub query: String,
    pub title: String,
    pub source_url: String,
    pub image_url: Option<String>,
    pub source_name: String,
    #[sea_orm(column_type = "Text")]
    pub description: Option<String>,
    pub relevance_score: i32,
    pub created_at: String, // ISO8601 strings; SQLite has no native timestamp type
    pub cached_until: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
