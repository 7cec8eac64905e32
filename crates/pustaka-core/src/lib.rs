//! # Pustaka Core
//!
//! Core types, errors, and utilities for the Pustaka API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: Password hashing and verification
//! - [`validation`]: Field checks for loosely-typed JSON payloads
//!
//! # Example
//!
//! ```ignore
//! use pustaka_core::{AppError, hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Buku not found"));
//! let hash = hash_password("secure_password")?;
//! ```

pub mod errors;
pub mod password;
pub mod validation;

// Re-export commonly used types at crate root
pub use errors::{AppError, FieldErrors};
pub use password::{hash_password, verify_password};
