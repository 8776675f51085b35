use std::borrow::Cow;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// SeaORM entity for the `projects` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[serde(rename = "user")]
    pub user_id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[serde(rename = "category")]
    pub category_id: i32,
    pub deadline: Date,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_delete = "Cascade"
    )]
    Category,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters."))]
    pub name: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub description: String,
    pub category: i32,
    /// ISO date, `YYYY-MM-DD`.
    pub deadline: Date,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters."))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub description: Option<String>,
    pub category: Option<i32>,
    pub deadline: Option<Date>,
    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,
}

/// `?search=&name=&category=` on `GET /api/projects`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilter {
    pub search: Option<String>,
    pub name: Option<String>,
    pub category: Option<i32>,
}

/// `?project_id=` on `PUT`/`DELETE /api/projects`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectIdQuery {
    pub project_id: Option<i32>,
}

const PRICE_MAX_DIGITS: u32 = 10;
const PRICE_DECIMAL_PLACES: u32 = 2;

/// Fits a `DECIMAL(10, 2)` column and is not negative.
fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    let fail = |msg: &'static str| {
        Err(ValidationError::new("price").with_message(Cow::Borrowed(msg)))
    };

    if price.is_sign_negative() && !price.is_zero() {
        return fail("Ensure this value is greater than or equal to 0.");
    }

    let normalized = price.normalize();
    if normalized.scale() > PRICE_DECIMAL_PLACES {
        return fail("Ensure that there are no more than 2 decimal places.");
    }

    let whole_digits = normalized.trunc().abs().to_string().trim_start_matches('0').len() as u32;
    if whole_digits > PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES {
        return fail("Ensure that there are no more than 10 digits in total.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn price(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn price_accepts_cents_and_zero() {
        assert!(validate_price(&price("0")).is_ok());
        assert!(validate_price(&price("1250.50")).is_ok());
        assert!(validate_price(&price("99999999.99")).is_ok());
        // Trailing zeros do not count against the scale.
        assert!(validate_price(&price("10.500")).is_ok());
    }

    #[test]
    fn price_rejects_out_of_range_values() {
        assert!(validate_price(&price("-1")).is_err());
        assert!(validate_price(&price("10.125")).is_err());
        assert!(validate_price(&price("100000000.00")).is_err());
    }

    #[test]
    fn serialises_with_wire_field_names() {
        let model = Model {
            id: 7,
            user_id: 3,
            name: "Logo Design".to_string(),
            description: "A new logo".to_string(),
            category_id: 2,
            deadline: Date::from_ymd_opt(2026, 12, 1).unwrap(),
            price: price("150.00"),
            created_at: chrono::Utc::now(),
        };

        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["user"], 3);
        assert_eq!(json["category"], 2);
        assert_eq!(json["deadline"], "2026-12-01");
        assert_eq!(json["price"], "150.00");
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn create_body_parses_date_and_string_price() {
        let body: CreateProject = serde_json::from_value(serde_json::json!({
            "name": "Logo",
            "description": "desc",
            "category": 1,
            "deadline": "2026-11-30",
            "price": "99.90",
        }))
        .unwrap();

        assert_eq!(body.deadline, Date::from_ymd_opt(2026, 11, 30).unwrap());
        assert_eq!(body.price, price("99.90"));
        assert!(body.validate().is_ok());
    }
}
