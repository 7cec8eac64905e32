//! Bearer token creation and verification.
//!
//! Tokens are HS256 JWTs signed with [`JwtConfig::secret`]. Each call to
//! [`create_access_token`] mints a token with a fresh `jti`, so two logins
//! by the same user never produce the same token and one can be revoked
//! without touching the other.
//!
//! # Example
//!
//! ```ignore
//! use pustaka_auth::{create_access_token, verify_token};
//! use pustaka_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "reader@example.com", role_id, &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use pustaka_config::JwtConfig;
use pustaka_core::AppError;

use crate::claims::Claims;

/// Creates a signed access token for a user.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn create_access_token(
    user_id: i64,
    email: &str,
    role_id: i64,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = (now + jwt_config.access_token_expiry).max(0);

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role_id,
        jti: Uuid::new_v4().to_string(),
        exp: exp as usize,
        iat: now as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies signature and expiry and returns the embedded claims.
///
/// # Errors
///
/// Returns an unauthorized error if the token is malformed, was signed with
/// another secret, or has expired. Revocation is checked by the caller.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token".to_string()))
}
