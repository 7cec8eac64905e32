//! # Pustaka CLI
//!
//! Database seeding utilities for Pustaka testing and development.
//!
//! This library crate provides the seeding functionality used by the CLI
//! binary and by the integration tests.
//!
//! ## Usage
//!
//! ```ignore
//! use pustaka_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(50).with_users_per_role(2);
//! seed_all(&pool, config).await?;
//! ```

pub mod seeder;
