use actix_web::{HttpRequest, HttpResponse, web};
use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use validator::Validate;

use crate::auth::middleware::{AuthenticatedUser, MaybeUser};
use crate::auth::password::hash_password;
use crate::auth::permissions::require_anonymous;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::UserIdQuery;
use crate::models::users::{self, SignUp, UpdateUser, UserResponse};
use crate::pagination::{Paginated, PaginationConfig, PaginationQuery};

use super::ensure_category;

/// GET /api/users — the caller's own record, in the usual list envelope.
pub async fn get_own_user(
    req: HttpRequest,
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    pagination: web::Data<PaginationConfig>,
    query: web::Query<PaginationQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = query.resolve(&pagination)?;
    let (items, count) = user_db::list_own_user(db.get_ref(), user.0.id, page).await?;

    let body = Paginated::build(&req, page, count, items)?.map(UserResponse::from);
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/users — sign up. Only anonymous callers may create an account.
pub async fn sign_up(
    user: MaybeUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<SignUp>,
) -> Result<HttpResponse, ApiError> {
    require_anonymous(user.0.as_ref())?;

    let input = body.into_inner();
    input.validate()?;

    if user_db::username_taken(db.get_ref(), &input.username, None).await? {
        return Err(ApiError::field(
            "username",
            "A user with that username already exists.",
        ));
    }
    if let Some(phone) = input.phone_number.as_deref() {
        if user_db::phone_number_taken(db.get_ref(), phone, None).await? {
            return Err(ApiError::field(
                "phone_number",
                "user with this Phone Number already exists.",
            ));
        }
    }
    if let Some(category) = input.category {
        ensure_category(db.get_ref(), category).await?;
    }

    let password_hash = hash_password(&input.password);
    let created = user_db::insert_user(db.get_ref(), input, password_hash)
        .await
        .map_err(unique_field_error)?;
    tracing::info!(user_id = created.id, "user signed up");

    Ok(HttpResponse::Created().json(serde_json::json!({
        "detail": "User created successfully! Now you have an account.",
        "data": UserResponse::from(created),
    })))
}

/// PUT /api/users?user_id= — partial update of the caller's own account.
pub async fn update_user(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<UserIdQuery>,
    body: web::Json<UpdateUser>,
) -> Result<HttpResponse, ApiError> {
    let target = own_target(db.get_ref(), &user.0, query.user_id, "update").await?;

    let input = body.into_inner();
    input.validate()?;

    if let Some(username) = input.username.as_deref() {
        if user_db::username_taken(db.get_ref(), username, Some(target.id)).await? {
            return Err(ApiError::field(
                "username",
                "A user with that username already exists.",
            ));
        }
    }
    if let Some(phone) = input.phone_number.as_deref() {
        if user_db::phone_number_taken(db.get_ref(), phone, Some(target.id)).await? {
            return Err(ApiError::field(
                "phone_number",
                "user with this Phone Number already exists.",
            ));
        }
    }
    if let Some(category) = input.category {
        ensure_category(db.get_ref(), category).await?;
    }

    let password_hash = input.password.as_deref().map(hash_password);
    let updated = user_db::update_user(db.get_ref(), target, input, password_hash)
        .await
        .map_err(unique_field_error)?;
    tracing::info!(user_id = updated.id, "user updated");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "detail": "User updated successfully!",
        "data": UserResponse::from(updated),
    })))
}

/// DELETE /api/users?user_id= — delete the caller's own account and everything it owns.
pub async fn delete_user(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<UserIdQuery>,
) -> Result<HttpResponse, ApiError> {
    let target = own_target(db.get_ref(), &user.0, query.user_id, "delete").await?;

    user_db::delete_user(db.get_ref(), target.id).await?;
    tracing::info!(user_id = target.id, "user deleted");

    Ok(HttpResponse::NoContent().finish())
}

/// A concurrent writer can win the race past the uniqueness pre-checks; the
/// unique index still rejects the row, reported as the same field error.
fn unique_field_error(err: DbErr) -> ApiError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("phone_number") => {
            ApiError::field("phone_number", "user with this Phone Number already exists.")
        }
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ApiError::field("username", "A user with that username already exists.")
        }
        _ => ApiError::Database(err),
    }
}

/// id present (400) -> user exists (404) -> user is the caller (403).
async fn own_target(
    db: &DatabaseConnection,
    caller: &users::Model,
    user_id: Option<i32>,
    action: &str,
) -> Result<users::Model, ApiError> {
    let id = user_id.ok_or_else(|| ApiError::BadRequest("User ID is required".to_string()))?;

    let target = user_db::get_user_by_id(db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if target.id != caller.id {
        return Err(ApiError::Forbidden(format!(
            "You are not authorized to {action} this user."
        )));
    }

    Ok(target)
}
