///! HTTP-level tests for `/api/users` and `/api/auth`.
///!
///! Run with: `cargo test --test users_test`
#[macro_use]
mod common;

use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{Value, json};

use freelance_backend::auth::password::password_matches;
use freelance_backend::db::users::get_user_by_username;
use freelance_backend::models::{projects, sample_works, users};

fn sign_up_body(username: &str) -> Value {
    json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "password": "s3cure-passw0rd",
        "user_type": "freelancer",
        "phone_number": "5551234567",
    })
}

#[actix_web::test]
async fn test_sign_up_stores_a_hashed_password() {
    let db = common::setup_db().await;
    let app = test_app!(db);

    let req = TestRequest::post()
        .uri("/api/users/")
        .set_json(sign_up_body("newbie"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["detail"],
        "User created successfully! Now you have an account."
    );
    assert_eq!(body["data"]["username"], "newbie");
    assert_eq!(body["data"]["user_type"], "freelancer");
    assert!(body["data"].get("password").is_none());

    let stored = get_user_by_username(&db, "newbie").await.unwrap().unwrap();
    assert_ne!(stored.password, "s3cure-passw0rd");
    assert!(password_matches("s3cure-passw0rd", &stored.password));
    assert!(!stored.is_staff);
}

#[actix_web::test]
async fn test_authenticated_caller_cannot_sign_up() {
    let db = common::setup_db().await;
    let dev = common::freelancer(&db, "dev").await;
    let app = test_app!(db);

    let req = TestRequest::post()
        .uri("/api/users")
        .insert_header(common::bearer(&dev))
        .set_json(sign_up_body("second"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["detail"],
        "You cannot sign up because you already have an account."
    );
    assert_eq!(users::Entity::find().count(&db).await.unwrap(), 1);
}

#[actix_web::test]
async fn test_duplicate_username_and_phone_are_field_errors() {
    let db = common::setup_db().await;
    common::freelancer(&db, "taken").await;
    let app = test_app!(db);

    let req = TestRequest::post()
        .uri("/api/users")
        .set_json(sign_up_body("taken"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["errors"]["username"].is_array());

    let req = TestRequest::post()
        .uri("/api/users")
        .set_json(sign_up_body("first"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = TestRequest::post()
        .uri("/api/users")
        .set_json(sign_up_body("second"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["errors"]["phone_number"][0],
        "user with this Phone Number already exists."
    );
}

#[actix_web::test]
async fn test_sign_up_validates_fields() {
    let db = common::setup_db().await;
    let app = test_app!(db);

    let req = TestRequest::post()
        .uri("/api/users")
        .set_json(json!({
            "username": "shorty",
            "email": "not-an-email",
            "password": "short",
            "phone_number": "12345",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["errors"]["email"].is_array());
    assert!(body["errors"]["password"].is_array());
    assert!(body["errors"]["phone_number"].is_array());
}

#[actix_web::test]
async fn test_unknown_user_type_is_a_field_error() {
    let db = common::setup_db().await;
    let app = test_app!(db);

    let mut body = sign_up_body("climber");
    body["user_type"] = json!("admin");

    let req = TestRequest::post()
        .uri("/api/users")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Invalid data");
    assert!(body["errors"]["user_type"].is_array());
    assert_eq!(users::Entity::find().count(&db).await.unwrap(), 0);
}

#[actix_web::test]
async fn test_list_returns_only_the_caller() {
    let db = common::setup_db().await;
    let me = common::freelancer(&db, "me").await;
    common::employer(&db, "someone-else").await;
    let app = test_app!(db);

    let req = TestRequest::get()
        .uri("/api/users")
        .insert_header(common::bearer(&me))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["id"], me.id);
    assert_eq!(body["results"][0]["username"], "me");
}

#[actix_web::test]
async fn test_list_requires_authentication() {
    let db = common::setup_db().await;
    let app = test_app!(db);

    let req = TestRequest::get().uri("/api/users").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_user_updates_own_account_only() {
    let db = common::setup_db().await;
    let me = common::freelancer(&db, "me").await;
    let other = common::freelancer(&db, "other").await;
    let app = test_app!(db);

    let req = TestRequest::put()
        .uri(&format!("/api/users?user_id={}", me.id))
        .insert_header(common::bearer(&me))
        .set_json(json!({ "first_name": "Ada" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "User updated successfully!");
    assert_eq!(body["data"]["first_name"], "Ada");
    assert_eq!(body["data"]["username"], "me");

    let req = TestRequest::put()
        .uri(&format!("/api/users?user_id={}", other.id))
        .insert_header(common::bearer(&me))
        .set_json(json!({ "first_name": "Mallory" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = TestRequest::put()
        .uri("/api/users?user_id=9999")
        .insert_header(common::bearer(&me))
        .set_json(json!({ "first_name": "Nobody" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = TestRequest::put()
        .uri("/api/users")
        .insert_header(common::bearer(&me))
        .set_json(json!({ "first_name": "Nobody" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_deleting_account_removes_owned_records() {
    let db = common::setup_db().await;
    let design = common::category(&db, "Design").await;
    let boss = common::employer(&db, "boss").await;
    let dev = common::freelancer(&db, "dev").await;
    common::project(&db, &boss, &design, "Logo").await;
    common::sample_work(&db, &boss, "Old portfolio", "Figma").await;
    common::sample_work(&db, &dev, "Landing page", "Figma").await;
    let app = test_app!(db);

    let req = TestRequest::delete()
        .uri(&format!("/api/users?user_id={}", boss.id))
        .insert_header(common::bearer(&boss))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    assert!(users::Entity::find_by_id(boss.id).one(&db).await.unwrap().is_none());
    assert_eq!(projects::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(sample_works::Entity::find().count(&db).await.unwrap(), 1);
}

#[actix_web::test]
async fn test_cannot_delete_someone_else() {
    let db = common::setup_db().await;
    let me = common::freelancer(&db, "me").await;
    let other = common::freelancer(&db, "other").await;
    let app = test_app!(db);

    let req = TestRequest::delete()
        .uri(&format!("/api/users?user_id={}", other.id))
        .insert_header(common::bearer(&me))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(users::Entity::find().count(&db).await.unwrap(), 2);
}

#[actix_web::test]
async fn test_token_endpoint_issues_usable_token() {
    let db = common::setup_db().await;
    let dev = common::freelancer(&db, "dev").await;
    let app = test_app!(db);

    let req = TestRequest::post()
        .uri("/api/auth/token")
        .set_json(json!({ "username": "dev", "password": common::TEST_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["token_type"], "Bearer");
    let token = body["access"].as_str().unwrap().to_string();

    let req = TestRequest::get()
        .uri("/api/auth/me")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let me: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(me["id"], dev.id);
    assert_eq!(me["username"], "dev");
}

#[actix_web::test]
async fn test_token_endpoint_rejects_bad_credentials() {
    let db = common::setup_db().await;
    common::freelancer(&db, "dev").await;
    let app = test_app!(db);

    let req = TestRequest::post()
        .uri("/api/auth/token")
        .set_json(json!({ "username": "dev", "password": "wrong-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = TestRequest::post()
        .uri("/api/auth/token")
        .set_json(json!({ "username": "ghost", "password": "whatever" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_garbage_bearer_token_is_unauthenticated() {
    let db = common::setup_db().await;
    let app = test_app!(db);

    let req = TestRequest::get()
        .uri("/api/auth/me")
        .insert_header((header::AUTHORIZATION, "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // An invalid token is not treated as anonymous on sign-up either.
    let req = TestRequest::post()
        .uri("/api/users")
        .insert_header((header::AUTHORIZATION, "Bearer not.a.jwt"))
        .set_json(sign_up_body("sneaky"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
