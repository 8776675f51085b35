//! Role predicates used by the handlers. Each returns the error to send back
//! when the caller may not proceed.

use actix_web::http::Method;

use crate::error::ApiError;
use crate::models::users::{self, UserType};

/// GET, HEAD and OPTIONS never change anything.
pub fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Anyone may read; only staff accounts may write.
pub fn admin_or_read_only(method: &Method, user: Option<&users::Model>) -> Result<(), ApiError> {
    if is_safe_method(method) {
        return Ok(());
    }
    match user {
        None => Err(ApiError::Unauthenticated(
            "Authentication required".to_string(),
        )),
        Some(user) if user.is_staff => Ok(()),
        Some(_) => Err(ApiError::Forbidden(
            "You do not have permission to perform this action.".to_string(),
        )),
    }
}

/// The caller must hold the given account kind.
pub fn require_user_type(
    user: &users::Model,
    wanted: UserType,
    message: &str,
) -> Result<(), ApiError> {
    if user.user_type == Some(wanted) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(message.to_string()))
    }
}

/// Sign-up is for anonymous callers only.
pub fn require_anonymous(user: Option<&users::Model>) -> Result<(), ApiError> {
    match user {
        Some(_) => Err(ApiError::Forbidden(
            "You cannot sign up because you already have an account.".to_string(),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(user_type: Option<UserType>, is_staff: bool) -> users::Model {
        users::Model {
            id: 1,
            username: "someone".to_string(),
            email: "someone@example.com".to_string(),
            password: "$argon2id$stub".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            user_type,
            category_id: None,
            phone_number: None,
            resume: None,
            is_staff,
            is_active: true,
            date_joined: Utc::now(),
        }
    }

    #[test]
    fn reads_are_open_to_everyone() {
        assert!(admin_or_read_only(&Method::GET, None).is_ok());
        assert!(admin_or_read_only(&Method::HEAD, Some(&user(None, false))).is_ok());
    }

    #[test]
    fn writes_need_staff() {
        assert!(matches!(
            admin_or_read_only(&Method::POST, None),
            Err(ApiError::Unauthenticated(_))
        ));
        assert!(matches!(
            admin_or_read_only(&Method::DELETE, Some(&user(Some(UserType::Employer), false))),
            Err(ApiError::Forbidden(_))
        ));
        assert!(admin_or_read_only(&Method::PUT, Some(&user(None, true))).is_ok());
    }

    #[test]
    fn user_type_must_match_exactly() {
        let employer = user(Some(UserType::Employer), false);
        let untyped = user(None, false);

        assert!(require_user_type(&employer, UserType::Employer, "no").is_ok());
        assert!(require_user_type(&employer, UserType::Freelancer, "no").is_err());
        assert!(require_user_type(&untyped, UserType::Employer, "no").is_err());
    }

    #[test]
    fn sign_up_is_anonymous_only() {
        assert!(require_anonymous(None).is_ok());
        assert!(matches!(
            require_anonymous(Some(&user(None, false))),
            Err(ApiError::Forbidden(_))
        ));
    }
}
