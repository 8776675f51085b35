use sea_orm::*;

use super::icontains;
use crate::models::projects::{self, CreateProject, ProjectFilter, UpdateProject};
use crate::pagination::PageRequest;

/// Insert a new project owned by `user_id`.
pub async fn insert_project(
    db: &DatabaseConnection,
    input: CreateProject,
    user_id: i32,
) -> Result<projects::Model, DbErr> {
    let new_project = projects::ActiveModel {
        user_id: Set(user_id),
        name: Set(input.name),
        description: Set(input.description),
        category_id: Set(input.category),
        deadline: Set(input.deadline),
        price: Set(input.price),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    new_project.insert(db).await
}

/// One filtered page of projects plus the total count of matches.
///
/// `search` and `name` both match the name case-insensitively by substring;
/// `category` is an exact id match. All given filters must hold.
pub async fn list_projects(
    db: &DatabaseConnection,
    filter: &ProjectFilter,
    page: PageRequest,
) -> Result<(Vec<projects::Model>, u64), DbErr> {
    let mut query = projects::Entity::find();

    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        query = query.filter(icontains(projects::Column::Name, search));
    }
    if let Some(name) = filter.name.as_deref().filter(|s| !s.is_empty()) {
        query = query.filter(icontains(projects::Column::Name, name));
    }
    if let Some(category) = filter.category {
        query = query.filter(projects::Column::CategoryId.eq(category));
    }

    let paginator = query
        .order_by_asc(projects::Column::Id)
        .paginate(db, page.size);

    let count = paginator.num_items().await?;
    let items = paginator.fetch_page(page.index()).await?;
    Ok((items, count))
}

/// Fetch a project only if `user_id` owns it.
pub async fn get_owned_project(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
) -> Result<Option<projects::Model>, DbErr> {
    projects::Entity::find()
        .filter(projects::Column::Id.eq(id))
        .filter(projects::Column::UserId.eq(user_id))
        .one(db)
        .await
}

pub async fn update_project(
    db: &DatabaseConnection,
    existing: projects::Model,
    input: UpdateProject,
) -> Result<projects::Model, DbErr> {
    let mut active: projects::ActiveModel = existing.clone().into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(category) = input.category {
        active.category_id = Set(category);
    }
    if let Some(deadline) = input.deadline {
        active.deadline = Set(deadline);
    }
    if let Some(price) = input.price {
        active.price = Set(price);
    }

    if !active.is_changed() {
        return Ok(existing);
    }
    active.update(db).await
}

/// Delete a project by ID.
pub async fn delete_project(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
    projects::Entity::delete_by_id(id).exec(db).await
}
