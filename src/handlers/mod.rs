pub mod auth;
pub mod categories;
pub mod projects;
pub mod sample_works;
pub mod skills;
pub mod users;

use actix_web::web;
use sea_orm::DatabaseConnection;

use crate::db::categories::category_exists;
use crate::error::ApiError;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // Malformed bodies and query strings get the same JSON error shape as everything else.
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(format!("Malformed request body: {err}")).into()
    }));
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(format!("Invalid query parameters: {err}")).into()
    }));

    // ── Auth routes ──
    cfg.service(
        web::scope("/auth")
            .route("/token", web::post().to(auth::obtain_token))
            .route("/me", web::get().to(auth::me)),
    );

    // ── Category routes (read open, write staff-only) ──
    cfg.service(
        web::resource("/categories")
            .route(web::get().to(categories::list_categories))
            .route(web::post().to(categories::create_category)),
    );
    cfg.service(
        web::resource("/categories/{id}")
            .route(web::get().to(categories::get_category))
            .route(web::put().to(categories::update_category))
            .route(web::patch().to(categories::update_category))
            .route(web::delete().to(categories::delete_category)),
    );

    // ── Skill routes (read open, write staff-only) ──
    cfg.service(
        web::resource("/skills")
            .route(web::get().to(skills::list_skills))
            .route(web::post().to(skills::create_skill)),
    );
    cfg.service(
        web::resource("/skills/{id}")
            .route(web::get().to(skills::get_skill))
            .route(web::put().to(skills::update_skill))
            .route(web::patch().to(skills::update_skill))
            .route(web::delete().to(skills::delete_skill)),
    );

    // ── User routes (the target id travels in `?user_id=`) ──
    cfg.service(
        web::resource("/users")
            .route(web::get().to(users::get_own_user))
            .route(web::post().to(users::sign_up))
            .route(web::put().to(users::update_user))
            .route(web::delete().to(users::delete_user)),
    );

    // ── Project routes (the target id travels in `?project_id=`) ──
    cfg.service(
        web::resource("/projects")
            .route(web::get().to(projects::list_projects))
            .route(web::post().to(projects::create_project))
            .route(web::put().to(projects::update_project))
            .route(web::delete().to(projects::delete_project)),
    );

    // ── Sample work routes (the target id travels in `?sample_project_id=`) ──
    cfg.service(
        web::resource("/sample-work")
            .route(web::get().to(sample_works::list_sample_works))
            .route(web::post().to(sample_works::create_sample_work))
            .route(web::put().to(sample_works::update_sample_work))
            .route(web::delete().to(sample_works::delete_sample_work)),
    );
}

/// Reject a body whose `category` points nowhere, as a field error.
async fn ensure_category(db: &DatabaseConnection, id: i32) -> Result<(), ApiError> {
    if category_exists(db, id).await? {
        Ok(())
    } else {
        Err(ApiError::field(
            "category",
            format!("Invalid pk \"{id}\" - object does not exist."),
        ))
    }
}
