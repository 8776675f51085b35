use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::jwt::{self, Claims};
use crate::auth::middleware::AuthenticatedUser;
use crate::auth::password::password_matches;
use crate::config::AuthConfig;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::users::{Credentials, UserResponse};

/// POST /api/auth/token — exchange username + password for a bearer token.
pub async fn obtain_token(
    db: web::Data<DatabaseConnection>,
    auth: web::Data<AuthConfig>,
    body: web::Json<Credentials>,
) -> Result<HttpResponse, ApiError> {
    let creds = body.into_inner();
    let invalid = || ApiError::Unauthenticated("Invalid username or password".to_string());

    let user = user_db::get_user_by_username(db.get_ref(), &creds.username)
        .await?
        .ok_or_else(invalid)?;

    if !user.is_active || !password_matches(&creds.password, &user.password) {
        tracing::debug!(username = %creds.username, "rejected login");
        return Err(invalid());
    }

    let claims = Claims::for_user(&user, auth.token_ttl_secs);
    let token = jwt::issue_token(&claims, &auth.jwt_secret).map_err(ApiError::Internal)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "access": token,
        "token_type": "Bearer",
        "expires_in": auth.token_ttl_secs,
    })))
}

/// GET /api/auth/me — return the currently authenticated user's profile.
pub async fn me(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(UserResponse::from(user.0))
}
