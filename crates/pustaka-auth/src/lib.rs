//! # Pustaka Auth
//!
//! Bearer token utilities for the Pustaka API.
//!
//! - [`claims`]: JWT claim structure
//! - [`jwt`]: Token creation and verification
//!
//! Tokens only prove identity. The caller's role is always re-read from the
//! database, and revoked token IDs are checked by the HTTP layer.

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
