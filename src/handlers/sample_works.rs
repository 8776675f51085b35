use actix_web::{HttpRequest, HttpResponse, web};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::auth::permissions::require_user_type;
use crate::db::sample_works as sample_db;
use crate::error::ApiError;
use crate::models::sample_works::{
    CreateSampleWork, SampleWorkFilter, SampleWorkIdQuery, UpdateSampleWork,
};
use crate::models::users::UserType;
use crate::pagination::{Paginated, PaginationConfig, PaginationQuery};

/// GET /api/sample-work — list sample work, open to everyone.
/// Query params: ?search=landing&skill=figma&page=1
pub async fn list_sample_works(
    req: HttpRequest,
    db: web::Data<DatabaseConnection>,
    pagination: web::Data<PaginationConfig>,
    page_query: web::Query<PaginationQuery>,
    filter: web::Query<SampleWorkFilter>,
) -> Result<HttpResponse, ApiError> {
    let page = page_query.resolve(&pagination)?;
    let (items, count) = sample_db::list_sample_works(db.get_ref(), &filter, page).await?;

    Ok(HttpResponse::Ok().json(Paginated::build(&req, page, count, items)?))
}

/// POST /api/sample-work — freelancers only; the caller becomes the owner.
pub async fn create_sample_work(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateSampleWork>,
) -> Result<HttpResponse, ApiError> {
    require_user_type(
        &user.0,
        UserType::Freelancer,
        "Only freelancers can create sample projects",
    )?;

    let input = body.into_inner();
    input.validate()?;

    let sample = sample_db::insert_sample_work(db.get_ref(), input, user.0.id).await?;
    tracing::info!(sample_id = sample.id, owner = user.0.id, "sample work created");

    Ok(HttpResponse::Created().json(serde_json::json!({
        "detail": "Sample project created successfully!",
        "data": sample,
    })))
}

/// PUT /api/sample-work?sample_project_id= — partial update.
///
/// Unlike delete, the record is fetched by id alone and ownership is compared
/// afterwards, so a non-owner gets 403 here.
pub async fn update_sample_work(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<SampleWorkIdQuery>,
    body: web::Json<UpdateSampleWork>,
) -> Result<HttpResponse, ApiError> {
    let id = query
        .sample_project_id
        .ok_or_else(|| ApiError::BadRequest("sample_project_id is required".to_string()))?;

    let existing = sample_db::get_sample_work_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Sample project not found".to_string()))?;

    if existing.user_id != user.0.id {
        tracing::debug!(sample_id = id, caller = user.0.id, "not the owner");
        return Err(ApiError::Forbidden(
            "You can only update your own sample projects".to_string(),
        ));
    }

    let input = body.into_inner();
    input.validate()?;

    let updated = sample_db::update_sample_work(db.get_ref(), existing, input).await?;
    tracing::info!(sample_id = id, "sample work updated");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "detail": "Sample project updated successfully!",
        "data": updated,
    })))
}

/// DELETE /api/sample-work?sample_project_id= — freelancers only, own records only (404 otherwise).
pub async fn delete_sample_work(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<SampleWorkIdQuery>,
) -> Result<HttpResponse, ApiError> {
    require_user_type(
        &user.0,
        UserType::Freelancer,
        "Only freelancers can delete their sample projects",
    )?;

    let id = query
        .sample_project_id
        .ok_or_else(|| ApiError::BadRequest("sample_project_id is required".to_string()))?;

    let sample = sample_db::get_owned_sample_work(db.get_ref(), id, user.0.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Sample project not found".to_string()))?;

    sample_db::delete_sample_work(db.get_ref(), sample.id).await?;
    tracing::info!(sample_id = id, "sample work deleted");

    Ok(HttpResponse::NoContent().finish())
}
