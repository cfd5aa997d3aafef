//! Post entity for SeaORM.

use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub platform: String,
    pub status: String,
    pub scheduled_time: Option<DateTimeWithTimeZone>,
    pub engagement_score: i32,
    pub image_url: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for planner_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            platform: model.platform,
            status: model.status,
            scheduled_time: model.scheduled_time.map(Into::into),
            engagement_score: model.engagement_score,
            image_url: model.image_url,
            created_at: Some(model.created_at.into()),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<planner_core::domain::Post> for ActiveModel {
    fn from(post: planner_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            content: Set(post.content),
            platform: Set(post.platform),
            status: Set(post.status),
            scheduled_time: Set(post.scheduled_time.map(Into::into)),
            engagement_score: Set(post.engagement_score),
            image_url: Set(post.image_url),
            // The column is non-null; a post built outside the backend gets
            // its timestamp on first save.
            created_at: Set(post.created_at.unwrap_or_else(Utc::now).into()),
        }
    }
}
