//! # Pustaka DB
//!
//! Database pool initialization for the Pustaka API, using SQLx with
//! PostgreSQL.
//!
//! # Example
//!
//! ```ignore
//! use pustaka_config::DatabaseConfig;
//! use pustaka_db::init_db_pool;
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = init_db_pool(&DatabaseConfig::from_env()).await;
//! }
//! ```

use pustaka_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

/// Initializes a PostgreSQL connection pool.
///
/// The returned pool is cheaply cloneable and is shared through the
/// application state.
///
/// # Panics
///
/// Panics if the connection to the database fails.
pub async fn init_db_pool(config: &DatabaseConfig) -> PgPool {
    tracing::info!(
        max_connections = config.max_connections,
        "Connecting to database"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .expect("Failed to connect to database")
}

/// Returns `true` when the database answers a trivial query.
pub async fn ping(pool: &PgPool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
