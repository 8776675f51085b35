use std::borrow::Cow;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// The account kind, stored as a lowercase string. Accounts may also have none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[sea_orm(string_value = "freelancer")]
    Freelancer,
    #[sea_orm(string_value = "employer")]
    Employer,
}

impl UserType {
    /// Parse the wire value, `None` for anything but the two known kinds.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "freelancer" => Some(Self::Freelancer),
            "employer" => Some(Self::Employer),
            _ => None,
        }
    }
}

/// SeaORM entity for the `users` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub email: String,
    /// Argon2 PHC string, never the submitted value.
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: Option<UserType>,
    pub category_id: Option<i32>,
    #[sea_orm(unique)]
    pub phone_number: Option<String>,
    pub resume: Option<String>,
    pub is_staff: bool,
    pub is_active: bool,
    pub date_joined: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_delete = "Restrict"
    )]
    Category,
    #[sea_orm(has_many = "super::projects::Entity")]
    Projects,
    #[sea_orm(has_many = "super::sample_works::Entity")]
    SampleWorks,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::sample_works::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SampleWorks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs (not stored in DB, used for request bodies) ──

/// Used by `POST /api/users` (sign-up).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUp {
    #[validate(
        length(min = 1, max = 150, message = "Username must be 1-150 characters."),
        custom(function = "validate_username")
    )]
    pub username: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters."))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "First name must be at most 150 characters."))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "Last name must be at most 150 characters."))]
    pub last_name: String,
    #[validate(custom(function = "validate_user_type"))]
    pub user_type: Option<String>,
    pub category: Option<i32>,
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: Option<String>,
    pub resume: Option<String>,
}

/// Used by `PUT /api/users?user_id=`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(
        length(min = 1, max = 150, message = "Username must be 1-150 characters."),
        custom(function = "validate_username")
    )]
    pub username: Option<String>,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters."))]
    pub password: Option<String>,
    #[validate(length(max = 150, message = "First name must be at most 150 characters."))]
    pub first_name: Option<String>,
    #[validate(length(max = 150, message = "Last name must be at most 150 characters."))]
    pub last_name: Option<String>,
    #[validate(custom(function = "validate_user_type"))]
    pub user_type: Option<String>,
    pub category: Option<i32>,
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: Option<String>,
    pub resume: Option<String>,
}

/// Used by `POST /api/auth/token`.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// A safe user representation for API responses (never leaks the password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: Option<UserType>,
    pub category: Option<i32>,
    pub phone_number: Option<String>,
    pub resume: Option<String>,
    pub is_staff: bool,
    pub date_joined: DateTimeUtc,
}

impl From<Model> for UserResponse {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            email: m.email,
            first_name: m.first_name,
            last_name: m.last_name,
            user_type: m.user_type,
            category: m.category_id,
            phone_number: m.phone_number,
            resume: m.resume,
            is_staff: m.is_staff,
            date_joined: m.date_joined,
        }
    }
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    let ok = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
    if ok {
        Ok(())
    } else {
        Err(ValidationError::new("username").with_message(Cow::Borrowed(
            "Username may contain only letters, numbers, and @/./+/-/_ characters.",
        )))
    }
}

fn validate_user_type(value: &str) -> Result<(), ValidationError> {
    match UserType::parse(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("user_type").with_message(Cow::Owned(format!(
            "\"{value}\" is not a valid choice."
        )))),
    }
}

fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    if phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("phone_number")
            .with_message(Cow::Borrowed("Phone number must be exactly 10 digits.")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_up() -> SignUp {
        SignUp {
            username: "ana.dev".to_string(),
            email: "ana@example.com".to_string(),
            password: "correct horse".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            user_type: Some("freelancer".to_string()),
            category: None,
            phone_number: Some("0912345678".to_string()),
            resume: None,
        }
    }

    #[test]
    fn well_formed_sign_up_passes() {
        assert!(sign_up().validate().is_ok());
    }

    #[test]
    fn phone_number_must_be_ten_digits() {
        for bad in ["091234567", "09123456789", "09123a5678"] {
            let mut input = sign_up();
            input.phone_number = Some(bad.to_string());
            let errs = input.validate().unwrap_err();
            assert!(errs.field_errors().contains_key("phone_number"), "{bad}");
        }
    }

    #[test]
    fn username_rejects_spaces() {
        let mut input = sign_up();
        input.username = "ana dev".to_string();
        assert!(input.validate().unwrap_err().field_errors().contains_key("username"));
    }

    #[test]
    fn unknown_user_type_is_a_field_error() {
        let mut input = sign_up();
        input.user_type = Some("admin".to_string());
        assert!(input.validate().unwrap_err().field_errors().contains_key("user_type"));

        let update = UpdateUser {
            user_type: Some("Employer".to_string()),
            ..Default::default()
        };
        assert!(update.validate().unwrap_err().field_errors().contains_key("user_type"));
        assert_eq!(UserType::parse("employer"), Some(UserType::Employer));
    }

    #[test]
    fn update_skips_absent_fields() {
        assert!(UpdateUser::default().validate().is_ok());

        let update = UpdateUser {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(update.validate().unwrap_err().field_errors().contains_key("email"));
    }

    #[test]
    fn user_type_round_trips_as_lowercase() {
        let json = serde_json::to_string(&UserType::Employer).unwrap();
        assert_eq!(json, "\"employer\"");
        let parsed: UserType = serde_json::from_str("\"freelancer\"").unwrap();
        assert_eq!(parsed, UserType::Freelancer);
    }
}
