//! # Pustaka Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`cors`]: allowed CORS origins
//! - [`server`]: listener address and startup behaviour
//! - [`database`]: PostgreSQL connection settings
//!
//! Every struct exposes `from_env()` plus a `from_vars()` variant taking a
//! lookup closure, which is what the tests use.
//!
//! # Example
//!
//! ```ignore
//! use pustaka_config::{JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
