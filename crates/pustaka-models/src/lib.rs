//! # Pustaka Models
//!
//! Domain models and DTOs for the Pustaka API.
//!
//! - [`ids`]: Strongly-typed IDs
//! - [`roles`]: Role rows and the fixed [`RoleName`] set
//! - [`users`]: User rows, with and without credentials
//! - [`buku`]: Buku rows and the create/update payload
//! - [`auth`]: Register and login payloads and responses

pub mod auth;
pub mod buku;
pub mod ids;
pub mod roles;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{AuthResponse, LoginFields, LoginRequest, RegisterFields, RegisterRequest};
pub use buku::{Buku, BukuFields, BukuRequest};
pub use ids::{BukuId, RoleId, UserId};
pub use roles::{Role, RoleName};
pub use users::{User, UserCredentials, UserWithRole};
