use sea_orm::*;

use super::icontains;
use crate::models::sample_works::{self, CreateSampleWork, SampleWorkFilter, UpdateSampleWork};
use crate::pagination::PageRequest;

/// Insert a new sample work owned by `user_id`.
pub async fn insert_sample_work(
    db: &DatabaseConnection,
    input: CreateSampleWork,
    user_id: i32,
) -> Result<sample_works::Model, DbErr> {
    let new_sample = sample_works::ActiveModel {
        user_id: Set(user_id),
        name: Set(input.name),
        description: Set(input.description),
        skill: Set(input.skill),
        image: Set(input.image),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    new_sample.insert(db).await
}

pub async fn list_sample_works(
    db: &DatabaseConnection,
    filter: &SampleWorkFilter,
    page: PageRequest,
) -> Result<(Vec<sample_works::Model>, u64), DbErr> {
    let mut query = sample_works::Entity::find();

    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        query = query.filter(icontains(sample_works::Column::Name, search));
    }
    if let Some(skill) = filter.skill.as_deref().filter(|s| !s.is_empty()) {
        query = query.filter(icontains(sample_works::Column::Skill, skill));
    }

    let paginator = query
        .order_by_asc(sample_works::Column::Id)
        .paginate(db, page.size);

    let count = paginator.num_items().await?;
    let items = paginator.fetch_page(page.index()).await?;
    Ok((items, count))
}

/// Fetch a single sample work by ID, whoever owns it.
pub async fn get_sample_work_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<sample_works::Model>, DbErr> {
    sample_works::Entity::find_by_id(id).one(db).await
}

/// Fetch a sample work only if `user_id` owns it.
pub async fn get_owned_sample_work(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
) -> Result<Option<sample_works::Model>, DbErr> {
    sample_works::Entity::find()
        .filter(sample_works::Column::Id.eq(id))
        .filter(sample_works::Column::UserId.eq(user_id))
        .one(db)
        .await
}

pub async fn update_sample_work(
    db: &DatabaseConnection,
    existing: sample_works::Model,
    input: UpdateSampleWork,
) -> Result<sample_works::Model, DbErr> {
    let mut active: sample_works::ActiveModel = existing.clone().into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(skill) = input.skill {
        active.skill = Set(skill);
    }
    if let Some(image) = input.image {
        active.image = Set(Some(image));
    }

    if !active.is_changed() {
        return Ok(existing);
    }
    active.update(db).await
}

/// Delete a sample work by ID.
pub async fn delete_sample_work(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
    sample_works::Entity::delete_by_id(id).exec(db).await
}
