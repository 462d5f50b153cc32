//! HTTP-level tests for login, password change, and bearer token handling.

mod common;

use axum::http::StatusCode;
use catalog_api::bootstrap::ensure_admin_user;
use catalog_api::config::AdminBootstrap;
use catalog_db::repositories::UserRepo;
use common::{body_json, get, get_auth, post_json, post_json_auth, TEST_PASSWORD};
use serde_json::json;
use sqlx::PgPool;

async fn login(app: axum::Router, username: &str, password: &str) -> axum::response::Response {
    post_json(
        app,
        "/api/auth/login",
        json!({ "username": username, "password": password }),
    )
    .await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success(pool: PgPool) {
    common::create_user(&pool, "admin").await;
    let app = common::build_test_app(pool);

    let response = login(app, "admin", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(json["username"], "admin");
    assert_eq!(json["expires_in"], 3600);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_token_opens_protected_routes(pool: PgPool) {
    common::create_user(&pool, "admin").await;
    let app = common::build_test_app(pool);

    let json = body_json(login(app.clone(), "admin", TEST_PASSWORD).await).await;
    let token = json["token"].as_str().unwrap();

    let response = get_auth(app.clone(), "/api/auth/me", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["username"], "admin");

    let response = post_json_auth(app, "/api/countries", json!({ "name": "Spain" }), token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password_and_unknown_user_look_the_same(pool: PgPool) {
    common::create_user(&pool, "admin").await;
    let app = common::build_test_app(pool);

    let wrong = login(app.clone(), "admin", "not-the-password").await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong = body_json(wrong).await;

    let unknown = login(app, "nobody", TEST_PASSWORD).await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown = body_json(unknown).await;

    assert_eq!(wrong["message"], unknown["message"]);
    assert_eq!(wrong["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_requires_both_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/auth/login", json!({ "username": "admin" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_token_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/categories").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_token_is_403(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/categories", "not.a.jwt").await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_change_password(pool: PgPool) {
    let token = common::auth_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json_auth(
        app.clone(),
        "/api/auth/change-password",
        json!({ "currentPassword": "wrong-password", "newPassword": "another-secret" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app.clone(),
        "/api/auth/change-password",
        json!({ "currentPassword": TEST_PASSWORD, "newPassword": "short" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app.clone(),
        "/api/auth/change-password",
        json!({ "currentPassword": TEST_PASSWORD, "newPassword": "another-secret" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        login(app.clone(), "tester", TEST_PASSWORD).await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        login(app, "tester", "another-secret").await.status(),
        StatusCode::OK
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_change_password_for_user_deleted_mid_request_is_404(pool: PgPool) {
    let token = common::auth_token(&pool).await;
    let user = UserRepo::find_by_username(&pool, "tester").await.unwrap().unwrap();
    let app = common::build_test_app(pool.clone());

    // Delete the user in an open transaction so the password update blocks
    // on the row and then finds it gone.
    let mut tx = pool.begin().await.unwrap();
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&mut *tx)
        .await
        .unwrap();

    let request = tokio::spawn(async move {
        post_json_auth(
            app,
            "/api/auth/change-password",
            json!({ "currentPassword": TEST_PASSWORD, "newPassword": "another-secret" }),
            &token,
        )
        .await
    });
    tokio::time::sleep(std::time::Duration::from_millis(500)).await;
    tx.commit().await.unwrap();

    let response = request.await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bootstrap_creates_first_user_once(pool: PgPool) {
    let admin = AdminBootstrap {
        username: "admin".to_string(),
        password: "initial-secret".to_string(),
    };
    assert!(ensure_admin_user(&pool, &admin).await.unwrap());

    let changed = AdminBootstrap {
        username: "admin2".to_string(),
        password: "other-secret".to_string(),
    };
    assert!(!ensure_admin_user(&pool, &changed).await.unwrap());
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);

    let app = common::build_test_app(pool);
    assert_eq!(
        login(app, "admin", "initial-secret").await.status(),
        StatusCode::OK
    );
}
