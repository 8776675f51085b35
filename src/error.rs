use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use serde_json::{Map, Value, json};
use thiserror::Error;
use validator::ValidationErrors;

/// Every way a request can fail. Rendered as `{"detail": ..., "errors"?: ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    /// Field errors, keyed by field name, each a list of messages.
    #[error("Invalid data")]
    Validation(Value),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// A single field error, shaped like the validator output.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Map::new();
        errors.insert(field.to_string(), json!([message.into()]));
        ApiError::Validation(Value::Object(errors))
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = Map::new();
        for (field, errs) in errors.field_errors() {
            let messages: Vec<Value> = errs
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => Value::String(msg.to_string()),
                    None => Value::String(format!("Invalid value ({})", e.code)),
                })
                .collect();
            out.insert(field.to_string(), Value::Array(messages));
        }
        ApiError::Validation(Value::Object(out))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation(errors) => json!({
                "detail": "Invalid data",
                "errors": errors,
            }),
            ApiError::Database(e) => {
                tracing::error!("Database error: {e}");
                json!({ "detail": "Internal server error" })
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {e}");
                json!({ "detail": "Internal server error" })
            }
            other => json!({ "detail": other.to_string() }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
