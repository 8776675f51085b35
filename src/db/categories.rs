use sea_orm::*;

use crate::models::categories::{self, CreateCategory, UpdateCategory};
use crate::models::{projects, skills, users};
use crate::pagination::PageRequest;

/// Insert a new category.
pub async fn insert_category(
    db: &DatabaseConnection,
    input: CreateCategory,
) -> Result<categories::Model, DbErr> {
    let new_category = categories::ActiveModel {
        name: Set(input.name),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    new_category.insert(db).await
}

/// One page of categories plus the total count.
pub async fn list_categories(
    db: &DatabaseConnection,
    page: PageRequest,
) -> Result<(Vec<categories::Model>, u64), DbErr> {
    let paginator = categories::Entity::find()
        .order_by_asc(categories::Column::Id)
        .paginate(db, page.size);

    let count = paginator.num_items().await?;
    let items = paginator.fetch_page(page.index()).await?;
    Ok((items, count))
}

/// Fetch a single category by ID.
pub async fn get_category_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<categories::Model>, DbErr> {
    categories::Entity::find_by_id(id).one(db).await
}

pub async fn category_exists(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
    Ok(get_category_by_id(db, id).await?.is_some())
}

/// Apply a partial update to an already-fetched category.
pub async fn update_category(
    db: &DatabaseConnection,
    existing: categories::Model,
    input: UpdateCategory,
) -> Result<categories::Model, DbErr> {
    let mut active: categories::ActiveModel = existing.clone().into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }

    if !active.is_changed() {
        return Ok(existing);
    }
    active.update(db).await
}

/// Number of accounts that picked this category as their job field.
pub async fn count_users_in_category(db: &DatabaseConnection, id: i32) -> Result<u64, DbErr> {
    users::Entity::find()
        .filter(users::Column::CategoryId.eq(id))
        .count(db)
        .await
}

/// Delete a category along with its skills and projects, in one transaction.
pub async fn delete_category(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
    let txn = db.begin().await?;

    skills::Entity::delete_many()
        .filter(skills::Column::CategoryId.eq(id))
        .exec(&txn)
        .await?;
    projects::Entity::delete_many()
        .filter(projects::Column::CategoryId.eq(id))
        .exec(&txn)
        .await?;
    let result = categories::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(result)
}
