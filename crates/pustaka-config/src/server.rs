use std::env;

/// HTTP listener settings.
///
/// - `HOST` (default: `0.0.0.0`)
/// - `PORT` (default: `3000`)
/// - `RUN_MIGRATIONS`: apply pending migrations on startup (default: `true`)
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub run_migrations: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: var("PORT").and_then(|s| s.parse().ok()).unwrap_or(3000),
            run_migrations: var("RUN_MIGRATIONS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(true),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
