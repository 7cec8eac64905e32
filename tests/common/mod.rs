use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use http_body_util::BodyExt;
use pustaka::router::init_router;
use pustaka::state::AppState;
use pustaka_auth::create_access_token;
use pustaka_cli::seeder::{self, BukuSeed};
use pustaka_config::{CorsConfig, JwtConfig};
use pustaka_models::{Buku, RoleId, RoleName, UserId};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "password123";

#[allow(dead_code)]
pub struct TestUser {
    pub id: UserId,
    pub email: String,
    pub password: String,
    pub role_id: RoleId,
    /// A token minted directly, without going through login
    pub token: String,
}

#[allow(dead_code)]
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key-at-least-32-characters-long".to_string(),
        access_token_expiry: 3600,
    }
}

#[allow(dead_code)]
pub fn setup_test_app(pool: PgPool) -> axum::Router {
    let state = AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig::from_vars(|_| None),
    };
    init_router(state)
}

#[allow(dead_code)]
pub async fn seed_roles(pool: &PgPool) {
    seeder::roles::seed_roles(pool).await.unwrap();
}

#[allow(dead_code)]
pub async fn role_id(pool: &PgPool, role: RoleName) -> RoleId {
    seeder::roles::find_role_id(pool, role).await.unwrap()
}

/// Creates a user with `role`. Roles must be seeded first.
#[allow(dead_code)]
pub async fn create_test_user(pool: &PgPool, role: RoleName) -> TestUser {
    let email = generate_unique_email();
    let user = seeder::users::create_user(pool, "Test User", &email, TEST_PASSWORD, role)
        .await
        .unwrap();

    let token = create_access_token(
        user.id.into_inner(),
        &user.email,
        user.role_id.into_inner(),
        &test_jwt_config(),
    )
    .unwrap();

    TestUser {
        id: user.id,
        email: user.email,
        password: TEST_PASSWORD.to_string(),
        role_id: user.role_id,
        token,
    }
}

#[allow(dead_code)]
pub async fn create_test_buku(pool: &PgPool, judul: &str) -> Buku {
    let seed = BukuSeed {
        judul: judul.to_string(),
        penulis: "Test Author".to_string(),
        tahun_terbit: 2024,
        deskripsi: "Test Description".to_string(),
    };

    seeder::buku::insert_buku_batch(pool, &[seed])
        .await
        .unwrap()
        .remove(0)
}

#[allow(dead_code)]
pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: &Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    builder
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

#[allow(dead_code)]
pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    builder.body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Field names listed under `errors` in a 422 body.
#[allow(dead_code)]
pub fn error_fields(body: &Value) -> Vec<String> {
    let mut fields: Vec<String> = body["errors"]
        .as_object()
        .map(|errors| errors.keys().cloned().collect())
        .unwrap_or_default();
    fields.sort();
    fields
}
