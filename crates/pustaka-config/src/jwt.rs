use std::env;

/// JWT signing configuration.
///
/// - `JWT_SECRET`: HMAC secret used to sign tokens
/// - `JWT_ACCESS_EXPIRY`: token lifetime in seconds (default: 86400, one day)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            secret: var("JWT_SECRET")
                .unwrap_or_else(|| "your-secret-key-change-in-production".to_string()),
            access_token_expiry: var("JWT_ACCESS_EXPIRY")
                .and_then(|s| s.parse().ok())
                .unwrap_or(86400), // 1 day
        }
    }
}
