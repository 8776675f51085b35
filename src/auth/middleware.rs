use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::pin::Pin;

use crate::auth::jwt;
use crate::config::AuthConfig;
use crate::db::users::get_user_by_id;
use crate::error::ApiError;
use crate::models::users;

/// The caller, resolved from a valid bearer token. Rejects with 401 otherwise.
pub struct AuthenticatedUser(pub users::Model);

/// The caller if a bearer token was sent, `None` for anonymous requests.
/// A token that is present but invalid is still a 401.
pub struct MaybeUser(pub Option<users::Model>);

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            if !req.headers().contains_key(header::AUTHORIZATION) {
                return Err(ApiError::Unauthenticated(
                    "Authentication required".to_string(),
                ));
            }
            resolve_user(&req).await.map(AuthenticatedUser)
        })
    }
}

impl FromRequest for MaybeUser {
    type Error = ApiError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            if !req.headers().contains_key(header::AUTHORIZATION) {
                return Ok(MaybeUser(None));
            }
            resolve_user(&req).await.map(|user| MaybeUser(Some(user)))
        })
    }
}

async fn resolve_user(req: &HttpRequest) -> Result<users::Model, ApiError> {
    // 1. Extract the Bearer token from the Authorization header.
    let bearer = BearerAuth::extract(req).await.map_err(|_| {
        ApiError::Unauthenticated("Authorization header must be: Bearer <token>".to_string())
    })?;

    // 2. Validate the JWT against the configured secret.
    let auth = req
        .app_data::<web::Data<AuthConfig>>()
        .ok_or_else(|| ApiError::Internal("Auth config not configured".to_string()))?;

    let claims = jwt::validate_token(bearer.token(), &auth.jwt_secret)
        .map_err(|e| ApiError::Unauthenticated(format!("Invalid token: {e}")))?;
    let user_id = claims.user_id().map_err(ApiError::Unauthenticated)?;

    // 3. Load the account; deleted or deactivated users lose access immediately.
    let db = req
        .app_data::<web::Data<DatabaseConnection>>()
        .ok_or_else(|| ApiError::Internal("Database not configured".to_string()))?;

    get_user_by_id(db.get_ref(), user_id)
        .await?
        .filter(|user| user.is_active)
        .ok_or_else(|| ApiError::Unauthenticated("User not found or inactive".to_string()))
}
