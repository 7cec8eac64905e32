use std::env;

/// PostgreSQL connection settings.
///
/// - `DATABASE_URL`: connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// # Panics
    ///
    /// Panics if `DATABASE_URL` is not set.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok()).expect("DATABASE_URL must be set")
    }

    /// Returns `None` when `DATABASE_URL` is missing.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Option<Self> {
        Some(Self {
            url: var("DATABASE_URL")?,
            max_connections: var("DATABASE_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        })
    }
}
