//! JWT claim structure for bearer tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pustaka_core::AppError;

/// Claims embedded in every bearer token.
///
/// - `sub`: User ID (subject)
/// - `email`: User's email at issue time
/// - `role_id`: Role ID at issue time (informational, the role is re-read per request)
/// - `jti`: Unique token ID, used for revocation
/// - `exp`: Expiration timestamp
/// - `iat`: Issued-at timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub email: String,
    pub role_id: i64,
    /// Unique token identifier (JWT ID)
    pub jti: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid user ID in token".to_string()))
    }

    pub fn token_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.jti)
            .map_err(|_| AppError::unauthorized("Invalid token ID".to_string()))
    }
}
