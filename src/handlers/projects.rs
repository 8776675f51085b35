use actix_web::{HttpRequest, HttpResponse, web};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::auth::permissions::require_user_type;
use crate::db::projects as project_db;
use crate::error::ApiError;
use crate::models::projects::{CreateProject, ProjectFilter, ProjectIdQuery, UpdateProject};
use crate::models::users::UserType;
use crate::pagination::{Paginated, PaginationConfig, PaginationQuery};

use super::ensure_category;

/// GET /api/projects — list projects, open to everyone.
/// Query params: ?search=logo&name=logo&category=3&page=1&page_size=10
pub async fn list_projects(
    req: HttpRequest,
    db: web::Data<DatabaseConnection>,
    pagination: web::Data<PaginationConfig>,
    page_query: web::Query<PaginationQuery>,
    filter: web::Query<ProjectFilter>,
) -> Result<HttpResponse, ApiError> {
    let page = page_query.resolve(&pagination)?;
    let (items, count) = project_db::list_projects(db.get_ref(), &filter, page).await?;

    Ok(HttpResponse::Ok().json(Paginated::build(&req, page, count, items)?))
}

/// POST /api/projects — employers only; the caller becomes the owner.
pub async fn create_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateProject>,
) -> Result<HttpResponse, ApiError> {
    require_user_type(
        &user.0,
        UserType::Employer,
        "Just employers can create a project",
    )?;

    let input = body.into_inner();
    input.validate()?;
    ensure_category(db.get_ref(), input.category).await?;

    let project = project_db::insert_project(db.get_ref(), input, user.0.id).await?;
    tracing::info!(project_id = project.id, owner = user.0.id, "project created");

    Ok(HttpResponse::Created().json(serde_json::json!({
        "detail": "Project created successfully!",
        "data": project,
    })))
}

/// PUT /api/projects?project_id= — partial update of one of the caller's projects.
///
/// Ownership is part of the lookup, so someone else's project is reported as
/// not found rather than forbidden.
pub async fn update_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ProjectIdQuery>,
    body: web::Json<UpdateProject>,
) -> Result<HttpResponse, ApiError> {
    let id = query
        .project_id
        .ok_or_else(|| ApiError::BadRequest("Project ID is required".to_string()))?;

    let existing = project_db::get_owned_project(db.get_ref(), id, user.0.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    let input = body.into_inner();
    input.validate()?;
    if let Some(category) = input.category {
        ensure_category(db.get_ref(), category).await?;
    }

    let updated = project_db::update_project(db.get_ref(), existing, input).await?;
    tracing::info!(project_id = id, "project updated");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "detail": "Project updated successfully!",
        "data": updated,
    })))
}

/// DELETE /api/projects?project_id= — employers only, own projects only (404 otherwise).
pub async fn delete_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ProjectIdQuery>,
) -> Result<HttpResponse, ApiError> {
    require_user_type(
        &user.0,
        UserType::Employer,
        "Just employers can delete projects",
    )?;

    let id = query
        .project_id
        .ok_or_else(|| ApiError::BadRequest("Project ID is required".to_string()))?;

    let project = project_db::get_owned_project(db.get_ref(), id, user.0.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    project_db::delete_project(db.get_ref(), project.id).await?;
    tracing::info!(project_id = id, "project deleted");

    Ok(HttpResponse::NoContent().finish())
}
