mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    TEST_PASSWORD, body_json, create_test_user, empty_request, error_fields,
    generate_unique_email, json_request, role_id, seed_roles, setup_test_app,
};
use pustaka_models::RoleName;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_register_success(pool: PgPool) {
    seed_roles(&pool).await;
    let viewer_role = role_id(&pool, RoleName::Viewer).await;
    let app = setup_test_app(pool.clone());

    let request = json_request(
        "POST",
        "/api/register",
        None,
        &json!({
            "name": "Test User",
            "email": "test@example.com",
            "password": "password123",
            "role_id": viewer_role
        }),
    );

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["user"]["name"], "Test User");
    assert_eq!(body["user"]["email"], "test@example.com");
    assert_eq!(body["user"]["role_id"], json!(viewer_role));
    assert!(body["user"]["id"].is_i64());
    assert!(body["user"].get("password").is_none());

    let token = body["token"].as_str().unwrap();
    assert!(!token.is_empty());

    // The returned token authenticates immediately
    let response = app
        .oneshot(empty_request("GET", "/api/me", Some(token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["email"], "test@example.com");
    assert_eq!(me["role"], "viewer");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_reports_every_invalid_field(pool: PgPool) {
    seed_roles(&pool).await;
    let app = setup_test_app(pool);

    let request = json_request(
        "POST",
        "/api/register",
        None,
        &json!({
            "name": "",
            "email": "invalid-email",
            "password": "123",
            "role_id": 999
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(
        error_fields(&body),
        vec!["email", "name", "password", "role_id"]
    );
    assert_eq!(body["errors"]["role_id"][0], "The selected role_id is invalid.");
    assert_eq!(
        body["errors"]["password"][0],
        "The password field must be at least 8 characters."
    );
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .ends_with("(and 3 more errors)")
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_empty_body_requires_every_field(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request("POST", "/api/register", None, &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(
        error_fields(&body),
        vec!["email", "name", "password", "role_id"]
    );
    assert_eq!(body["errors"]["name"][0], "The name field is required.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    seed_roles(&pool).await;
    let existing = create_test_user(&pool, RoleName::Editor).await;
    let editor_role = role_id(&pool, RoleName::Editor).await;
    let app = setup_test_app(pool);

    let request = json_request(
        "POST",
        "/api/register",
        None,
        &json!({
            "name": "Someone Else",
            "email": existing.email,
            "password": "password123",
            "role_id": editor_role
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(error_fields(&body), vec!["email"]);
    assert_eq!(body["errors"]["email"][0], "The email has already been taken.");
    assert_eq!(body["message"], "The email has already been taken.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_role_id_must_be_integer(pool: PgPool) {
    seed_roles(&pool).await;
    let app = setup_test_app(pool);

    let request = json_request(
        "POST",
        "/api/register",
        None,
        &json!({
            "name": "Test User",
            "email": generate_unique_email(),
            "password": "password123",
            "role_id": "admin"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(error_fields(&body), vec!["role_id"]);
    assert_eq!(
        body["errors"]["role_id"][0],
        "The role_id field must be an integer."
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_malformed_json(pool: PgPool) {
    let app = setup_test_app(pool);

    let request = Request::builder()
        .method("POST")
        .uri("/api/register")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid request body");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success(pool: PgPool) {
    seed_roles(&pool).await;
    let user = create_test_user(&pool, RoleName::Viewer).await;
    let app = setup_test_app(pool);

    let request = json_request(
        "POST",
        "/api/login",
        None,
        &json!({
            "email": user.email,
            "password": TEST_PASSWORD
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["user"]["id"], json!(user.id));
    assert_eq!(body["user"]["email"], user.email);
    assert_eq!(body["user"]["role_id"], json!(user.role_id));
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    seed_roles(&pool).await;
    let user = create_test_user(&pool, RoleName::Viewer).await;
    let app = setup_test_app(pool);

    let request = json_request(
        "POST",
        "/api/login",
        None,
        &json!({
            "email": user.email,
            "password": "wrongpassword"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body, json!({ "message": "Invalid credentials" }));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_unknown_email(pool: PgPool) {
    let app = setup_test_app(pool);

    let request = json_request(
        "POST",
        "/api/login",
        None,
        &json!({
            "email": "wrong@example.com",
            "password": "wrongpassword"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body, json!({ "message": "Invalid credentials" }));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_validation(pool: PgPool) {
    let app = setup_test_app(pool);

    let request = json_request(
        "POST",
        "/api/login",
        None,
        &json!({ "email": "not-an-email" }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(error_fields(&body), vec!["email", "password"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_rejects_non_string_fields(pool: PgPool) {
    let app = setup_test_app(pool);

    let request = json_request(
        "POST",
        "/api/login",
        None,
        &json!({ "email": 123, "password": ["x"] }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(error_fields(&body), vec!["email", "password"]);
    assert_eq!(body["errors"]["email"][0], "The email field must be a string.");
    assert_eq!(
        body["errors"]["password"][0],
        "The password field must be a string."
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_each_login_issues_a_new_token(pool: PgPool) {
    seed_roles(&pool).await;
    let user = create_test_user(&pool, RoleName::Viewer).await;
    let app = setup_test_app(pool);

    let credentials = json!({ "email": user.email, "password": TEST_PASSWORD });

    let first = body_json(
        app.clone()
            .oneshot(json_request("POST", "/api/login", None, &credentials))
            .await
            .unwrap(),
    )
    .await;
    let second = body_json(
        app.clone()
            .oneshot(json_request("POST", "/api/login", None, &credentials))
            .await
            .unwrap(),
    )
    .await;

    let first_token = first["token"].as_str().unwrap();
    let second_token = second["token"].as_str().unwrap();
    assert_ne!(first_token, second_token);

    // Both stay valid
    for token in [first_token, second_token] {
        let response = app
            .clone()
            .oneshot(empty_request("GET", "/api/buku", Some(token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_logout_revokes_only_that_token(pool: PgPool) {
    seed_roles(&pool).await;
    let user = create_test_user(&pool, RoleName::Editor).await;
    let app = setup_test_app(pool);

    let login = body_json(
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/login",
                None,
                &json!({ "email": user.email, "password": TEST_PASSWORD }),
            ))
            .await
            .unwrap(),
    )
    .await;
    let session_token = login["token"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(empty_request("POST", "/api/logout", Some(&session_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/buku", Some(&session_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Token has been revoked");

    // Logging out twice with the same token is rejected
    let response = app
        .clone()
        .oneshot(empty_request("POST", "/api/logout", Some(&session_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(empty_request("GET", "/api/buku", Some(&user.token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_returns_role(pool: PgPool) {
    seed_roles(&pool).await;
    let admin = create_test_user(&pool, RoleName::Admin).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(empty_request("GET", "/api/me", Some(&admin.token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], json!(admin.id));
    assert_eq!(body["email"], admin.email);
    assert_eq!(body["role"], "admin");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_requires_token(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(empty_request("GET", "/api/me", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Missing authorization header");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_of_deleted_user_is_rejected(pool: PgPool) {
    seed_roles(&pool).await;
    let user = create_test_user(&pool, RoleName::Viewer).await;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let app = setup_test_app(pool);
    let response = app
        .oneshot(empty_request("GET", "/api/buku", Some(&user.token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_health(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(empty_request("GET", "/health", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}
