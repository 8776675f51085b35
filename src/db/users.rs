use sea_orm::*;

use crate::config::AdminSeed;
use crate::models::users::{self, SignUp, UpdateUser, UserType};
use crate::models::{projects, sample_works};
use crate::pagination::PageRequest;

/// Create a new account. `password_hash` must already be hashed.
pub async fn insert_user(
    db: &DatabaseConnection,
    input: SignUp,
    password_hash: String,
) -> Result<users::Model, DbErr> {
    let new_user = users::ActiveModel {
        username: Set(input.username),
        email: Set(input.email),
        password: Set(password_hash),
        first_name: Set(input.first_name),
        last_name: Set(input.last_name),
        user_type: Set(input.user_type.as_deref().and_then(UserType::parse)),
        category_id: Set(input.category),
        phone_number: Set(input.phone_number),
        resume: Set(input.resume),
        is_staff: Set(false),
        is_active: Set(true),
        date_joined: Set(chrono::Utc::now()),
        ..Default::default()
    };

    new_user.insert(db).await
}

/// Create the configured staff account, or promote and re-key it if it exists.
pub async fn ensure_admin(
    db: &DatabaseConnection,
    seed: &AdminSeed,
    password_hash: String,
) -> Result<users::Model, DbErr> {
    if let Some(existing) = get_user_by_username(db, &seed.username).await? {
        let mut active: users::ActiveModel = existing.into();
        active.is_staff = Set(true);
        active.is_active = Set(true);
        active.password = Set(password_hash);
        return active.update(db).await;
    }

    let admin = users::ActiveModel {
        username: Set(seed.username.clone()),
        email: Set(seed.email.clone()),
        password: Set(password_hash),
        first_name: Set(String::new()),
        last_name: Set(String::new()),
        user_type: Set(None),
        category_id: Set(None),
        phone_number: Set(None),
        resume: Set(None),
        is_staff: Set(true),
        is_active: Set(true),
        date_joined: Set(chrono::Utc::now()),
        ..Default::default()
    };

    admin.insert(db).await
}

/// Fetch a single user by ID.
pub async fn get_user_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

pub async fn get_user_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(db)
        .await
}

/// The caller's own record, run through the regular paginator.
pub async fn list_own_user(
    db: &DatabaseConnection,
    id: i32,
    page: PageRequest,
) -> Result<(Vec<users::Model>, u64), DbErr> {
    let paginator = users::Entity::find()
        .filter(users::Column::Id.eq(id))
        .order_by_asc(users::Column::Id)
        .paginate(db, page.size);

    let count = paginator.num_items().await?;
    let items = paginator.fetch_page(page.index()).await?;
    Ok((items, count))
}

/// Is `username` held by an account other than `except`?
pub async fn username_taken(
    db: &DatabaseConnection,
    username: &str,
    except: Option<i32>,
) -> Result<bool, DbErr> {
    let mut query = users::Entity::find().filter(users::Column::Username.eq(username));
    if let Some(id) = except {
        query = query.filter(users::Column::Id.ne(id));
    }
    Ok(query.count(db).await? > 0)
}

/// Is `phone_number` held by an account other than `except`?
pub async fn phone_number_taken(
    db: &DatabaseConnection,
    phone_number: &str,
    except: Option<i32>,
) -> Result<bool, DbErr> {
    let mut query = users::Entity::find().filter(users::Column::PhoneNumber.eq(phone_number));
    if let Some(id) = except {
        query = query.filter(users::Column::Id.ne(id));
    }
    Ok(query.count(db).await? > 0)
}

/// Apply a partial update. A new password must arrive already hashed.
pub async fn update_user(
    db: &DatabaseConnection,
    existing: users::Model,
    input: UpdateUser,
    password_hash: Option<String>,
) -> Result<users::Model, DbErr> {
    let mut active: users::ActiveModel = existing.clone().into();

    if let Some(username) = input.username {
        active.username = Set(username);
    }
    if let Some(email) = input.email {
        active.email = Set(email);
    }
    if let Some(hash) = password_hash {
        active.password = Set(hash);
    }
    if let Some(first_name) = input.first_name {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = input.last_name {
        active.last_name = Set(last_name);
    }
    if let Some(user_type) = input.user_type.as_deref().and_then(UserType::parse) {
        active.user_type = Set(Some(user_type));
    }
    if let Some(category) = input.category {
        active.category_id = Set(Some(category));
    }
    if let Some(phone_number) = input.phone_number {
        active.phone_number = Set(Some(phone_number));
    }
    if let Some(resume) = input.resume {
        active.resume = Set(Some(resume));
    }

    if !active.is_changed() {
        return Ok(existing);
    }
    active.update(db).await
}

/// Delete a user along with their projects and sample work, in one transaction.
pub async fn delete_user(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
    let txn = db.begin().await?;

    projects::Entity::delete_many()
        .filter(projects::Column::UserId.eq(id))
        .exec(&txn)
        .await?;
    sample_works::Entity::delete_many()
        .filter(sample_works::Column::UserId.eq(id))
        .exec(&txn)
        .await?;
    let result = users::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(result)
}
