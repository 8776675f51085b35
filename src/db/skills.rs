use sea_orm::*;

use crate::models::skills::{self, CreateSkill, UpdateSkill};
use crate::pagination::PageRequest;

/// Insert a new skill. The category is expected to exist.
pub async fn insert_skill(
    db: &DatabaseConnection,
    input: CreateSkill,
) -> Result<skills::Model, DbErr> {
    let new_skill = skills::ActiveModel {
        name: Set(input.name),
        category_id: Set(input.category),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    new_skill.insert(db).await
}

pub async fn list_skills(
    db: &DatabaseConnection,
    page: PageRequest,
) -> Result<(Vec<skills::Model>, u64), DbErr> {
    let paginator = skills::Entity::find()
        .order_by_asc(skills::Column::Id)
        .paginate(db, page.size);

    let count = paginator.num_items().await?;
    let items = paginator.fetch_page(page.index()).await?;
    Ok((items, count))
}

/// Fetch a single skill by ID.
pub async fn get_skill_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<skills::Model>, DbErr> {
    skills::Entity::find_by_id(id).one(db).await
}

pub async fn update_skill(
    db: &DatabaseConnection,
    existing: skills::Model,
    input: UpdateSkill,
) -> Result<skills::Model, DbErr> {
    let mut active: skills::ActiveModel = existing.clone().into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(category) = input.category {
        active.category_id = Set(category);
    }

    if !active.is_changed() {
        return Ok(existing);
    }
    active.update(db).await
}

/// Delete a skill by ID.
pub async fn delete_skill(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
    skills::Entity::delete_by_id(id).exec(db).await
}
