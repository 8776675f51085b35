//! Shared fixtures for the HTTP integration tests.
//!
//! Every test gets its own in-memory SQLite database with the migrations
//! applied, so tests never see each other's rows.
#![allow(dead_code)]

use std::sync::OnceLock;

use actix_web::http::header;
use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

use freelance_backend::auth::jwt::{Claims, issue_token};
use freelance_backend::auth::password::hash_password;
use freelance_backend::config::AuthConfig;
use freelance_backend::models::users::{self, UserType};
use freelance_backend::models::{categories, projects, sample_works};

pub const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build the app exactly like `main` does, minus CORS and the server.
macro_rules! test_app {
    ($db:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::NormalizePath::trim())
                .app_data(actix_web::web::Data::new($db.clone()))
                .app_data(actix_web::web::Data::new(common::auth_config()))
                .app_data(actix_web::web::Data::new(
                    freelance_backend::pagination::PaginationConfig::default(),
                ))
                .service(
                    actix_web::web::scope("/api")
                        .configure(freelance_backend::handlers::init_routes),
                ),
        )
        .await
    };
}

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: TEST_SECRET.to_string(),
        token_ttl_secs: 3600,
    }
}

pub async fn setup_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    // One connection keeps every query on the same in-memory database.
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(opts).await.expect("sqlite connection");
    Migrator::up(&db, None).await.expect("migrations");
    db
}

/// Argon2 is slow in debug builds, so hash the fixture password once.
fn fixture_hash() -> String {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| hash_password(TEST_PASSWORD)).clone()
}

async fn insert_user(
    db: &DatabaseConnection,
    username: &str,
    user_type: Option<UserType>,
    is_staff: bool,
    category: Option<i32>,
) -> users::Model {
    users::ActiveModel {
        username: Set(username.to_string()),
        email: Set(format!("{username}@example.com")),
        password: Set(fixture_hash()),
        first_name: Set(String::new()),
        last_name: Set(String::new()),
        user_type: Set(user_type),
        category_id: Set(category),
        phone_number: Set(None),
        resume: Set(None),
        is_staff: Set(is_staff),
        is_active: Set(true),
        date_joined: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert user")
}

pub async fn employer(db: &DatabaseConnection, username: &str) -> users::Model {
    insert_user(db, username, Some(UserType::Employer), false, None).await
}

pub async fn freelancer(db: &DatabaseConnection, username: &str) -> users::Model {
    insert_user(db, username, Some(UserType::Freelancer), false, None).await
}

pub async fn staff(db: &DatabaseConnection, username: &str) -> users::Model {
    insert_user(db, username, None, true, None).await
}

pub async fn freelancer_in(
    db: &DatabaseConnection,
    username: &str,
    category: i32,
) -> users::Model {
    insert_user(db, username, Some(UserType::Freelancer), false, Some(category)).await
}

pub fn token_for(user: &users::Model) -> String {
    issue_token(&Claims::for_user(user, 3600), TEST_SECRET).expect("sign token")
}

pub fn bearer(user: &users::Model) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token_for(user)))
}

pub async fn category(db: &DatabaseConnection, name: &str) -> categories::Model {
    categories::ActiveModel {
        name: Set(name.to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert category")
}

/// Insert a project directly. Prices carry cents so SQLite keeps them as REAL.
pub async fn project(
    db: &DatabaseConnection,
    owner: &users::Model,
    category: &categories::Model,
    name: &str,
) -> projects::Model {
    projects::ActiveModel {
        user_id: Set(owner.id),
        name: Set(name.to_string()),
        description: Set(format!("{name} description")),
        category_id: Set(category.id),
        deadline: Set(chrono::NaiveDate::from_ymd_opt(2030, 1, 15).unwrap()),
        price: Set("99.50".parse().unwrap()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert project")
}

pub async fn sample_work(
    db: &DatabaseConnection,
    owner: &users::Model,
    name: &str,
    skill: &str,
) -> sample_works::Model {
    sample_works::ActiveModel {
        user_id: Set(owner.id),
        name: Set(name.to_string()),
        description: Set(format!("{name} description")),
        skill: Set(skill.to_string()),
        image: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert sample work")
}
