use pustaka_config::{CorsConfig, DatabaseConfig, JwtConfig};
use pustaka_db::{PgPool, init_db_pool};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    /// Builds state around an existing pool, reading the rest from the environment.
    pub fn with_pool(db: PgPool) -> Self {
        Self {
            db,
            jwt_config: JwtConfig::from_env(),
            cors_config: CorsConfig::from_env(),
        }
    }
}

pub async fn init_app_state() -> AppState {
    let db = init_db_pool(&DatabaseConfig::from_env()).await;
    AppState::with_pool(db)
}
