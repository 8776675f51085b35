use actix_web::{HttpRequest, HttpResponse, web};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::auth::middleware::MaybeUser;
use crate::auth::permissions::admin_or_read_only;
use crate::db::skills as skill_db;
use crate::error::ApiError;
use crate::models::skills::{CreateSkill, UpdateSkill};
use crate::pagination::{Paginated, PaginationConfig, PaginationQuery};

use super::ensure_category;

/// GET /api/skills — paginated list, open to everyone.
pub async fn list_skills(
    req: HttpRequest,
    db: web::Data<DatabaseConnection>,
    pagination: web::Data<PaginationConfig>,
    query: web::Query<PaginationQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = query.resolve(&pagination)?;
    let (items, count) = skill_db::list_skills(db.get_ref(), page).await?;

    Ok(HttpResponse::Ok().json(Paginated::build(&req, page, count, items)?))
}

/// GET /api/skills/{id}
pub async fn get_skill(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let skill = skill_db::get_skill_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Skill {id} not found")))?;

    Ok(HttpResponse::Ok().json(skill))
}

/// POST /api/skills — staff only.
pub async fn create_skill(
    req: HttpRequest,
    user: MaybeUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateSkill>,
) -> Result<HttpResponse, ApiError> {
    admin_or_read_only(req.method(), user.0.as_ref())?;

    let input = body.into_inner();
    input.validate()?;
    ensure_category(db.get_ref(), input.category).await?;

    let skill = skill_db::insert_skill(db.get_ref(), input).await?;
    tracing::info!(skill_id = skill.id, "skill created");

    Ok(HttpResponse::Created().json(skill))
}

/// PUT/PATCH /api/skills/{id} — staff only, partial update.
pub async fn update_skill(
    req: HttpRequest,
    user: MaybeUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    body: web::Json<UpdateSkill>,
) -> Result<HttpResponse, ApiError> {
    admin_or_read_only(req.method(), user.0.as_ref())?;

    let id = path.into_inner();
    let input = body.into_inner();
    input.validate()?;

    let existing = skill_db::get_skill_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Skill {id} not found")))?;
    if let Some(category) = input.category {
        ensure_category(db.get_ref(), category).await?;
    }

    let updated = skill_db::update_skill(db.get_ref(), existing, input).await?;
    tracing::info!(skill_id = id, "skill updated");

    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/skills/{id} — staff only.
pub async fn delete_skill(
    req: HttpRequest,
    user: MaybeUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    admin_or_read_only(req.method(), user.0.as_ref())?;

    let id = path.into_inner();
    let result = skill_db::delete_skill(db.get_ref(), id).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound(format!("Skill {id} not found")));
    }
    tracing::info!(skill_id = id, "skill deleted");

    Ok(HttpResponse::NoContent().finish())
}
