use actix_web::{HttpRequest, HttpResponse, web};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::auth::middleware::MaybeUser;
use crate::auth::permissions::admin_or_read_only;
use crate::db::categories as category_db;
use crate::error::ApiError;
use crate::models::categories::{CreateCategory, UpdateCategory};
use crate::pagination::{Paginated, PaginationConfig, PaginationQuery};

/// GET /api/categories — paginated list, open to everyone.
pub async fn list_categories(
    req: HttpRequest,
    db: web::Data<DatabaseConnection>,
    pagination: web::Data<PaginationConfig>,
    query: web::Query<PaginationQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = query.resolve(&pagination)?;
    let (items, count) = category_db::list_categories(db.get_ref(), page).await?;

    Ok(HttpResponse::Ok().json(Paginated::build(&req, page, count, items)?))
}

/// GET /api/categories/{id}
pub async fn get_category(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let category = category_db::get_category_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Category {id} not found")))?;

    Ok(HttpResponse::Ok().json(category))
}

/// POST /api/categories — staff only.
pub async fn create_category(
    req: HttpRequest,
    user: MaybeUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateCategory>,
) -> Result<HttpResponse, ApiError> {
    admin_or_read_only(req.method(), user.0.as_ref())?;

    let input = body.into_inner();
    input.validate()?;

    let category = category_db::insert_category(db.get_ref(), input).await?;
    tracing::info!(category_id = category.id, "category created");

    Ok(HttpResponse::Created().json(category))
}

/// PUT/PATCH /api/categories/{id} — staff only, partial update.
pub async fn update_category(
    req: HttpRequest,
    user: MaybeUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    body: web::Json<UpdateCategory>,
) -> Result<HttpResponse, ApiError> {
    admin_or_read_only(req.method(), user.0.as_ref())?;

    let id = path.into_inner();
    let input = body.into_inner();
    input.validate()?;

    let existing = category_db::get_category_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Category {id} not found")))?;

    let updated = category_db::update_category(db.get_ref(), existing, input).await?;
    tracing::info!(category_id = id, "category updated");

    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/categories/{id} — staff only. Skills and projects go with it.
pub async fn delete_category(
    req: HttpRequest,
    user: MaybeUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    admin_or_read_only(req.method(), user.0.as_ref())?;

    let id = path.into_inner();
    if !category_db::category_exists(db.get_ref(), id).await? {
        return Err(ApiError::NotFound(format!("Category {id} not found")));
    }

    // User.category is protected rather than cascaded.
    let referencing = category_db::count_users_in_category(db.get_ref(), id).await?;
    if referencing > 0 {
        return Err(ApiError::Conflict(format!(
            "Category {id} is the job field of {referencing} user(s) and cannot be deleted"
        )));
    }

    category_db::delete_category(db.get_ref(), id).await?;
    tracing::info!(category_id = id, "category deleted");

    Ok(HttpResponse::NoContent().finish())
}
