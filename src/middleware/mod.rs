//! Middleware modules for request processing.
//!
//! - [`auth`]: The [`auth::AuthUser`] extractor (bearer token to user and role)
//! - [`role`]: Route-group authorization layered onto routers
//!
//! # Request Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. The role layer resolves an `AuthUser` (401 on any token problem)
//! 3. The caller's role is checked against the route group (403 if denied)
//! 4. Handler executes, reusing the resolved `AuthUser`

pub mod auth;
pub mod role;
