use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// SeaORM entity for the `sample_works` table: a freelancer's portfolio piece.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sample_works")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[serde(rename = "user")]
    pub user_id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Free-text skill label, not a reference to the skills table.
    pub skill: String,
    pub image: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSampleWork {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters."))]
    pub name: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub description: String,
    #[validate(length(min = 1, max = 255, message = "Skill must be 1-255 characters."))]
    pub skill: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSampleWork {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters."))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Skill must be 1-255 characters."))]
    pub skill: Option<String>,
    pub image: Option<String>,
}

/// `?search=&skill=` on `GET /api/sample-work`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SampleWorkFilter {
    pub search: Option<String>,
    pub skill: Option<String>,
}

/// `?sample_project_id=` on `PUT`/`DELETE /api/sample-work`.
#[derive(Debug, Clone, Deserialize)]
pub struct SampleWorkIdQuery {
    pub sample_project_id: Option<i32>,
}
