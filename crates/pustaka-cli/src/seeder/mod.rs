//! Database seeding module for populating development and test data.
//!
//! # Module Structure
//!
//! - [`roles`] - The fixed admin/editor/viewer rows
//! - [`buku`] - Buku factory and batch insertion
//! - [`users`] - User generation for every role and single-user creation
//! - [`models`] - Data structures for seeding configuration
//!
//! # Usage
//!
//! ```ignore
//! use pustaka_cli::seeder::{seed_all, SeedConfig};
//!
//! seed_all(&db, SeedConfig::new(100)).await?;
//!
//! // Or step by step
//! roles::seed_roles(&db).await?;
//! buku::seed_buku(&db, 10).await?;
//! ```
//!
//! # Performance
//!
//! - Parallel data generation using Rayon
//! - Batch inserts with multi-value INSERT statements
//! - Single bcrypt hash reused for all generated users (cost 4 for speed)

pub mod buku;
pub mod models;
pub mod roles;
pub mod users;

pub use models::{BukuSeed, SeedConfig, UserSeed};

use bcrypt::hash;
use sqlx::PgPool;
use std::time::Instant;

/// Password shared by every generated user.
pub const DEFAULT_PASSWORD: &str = "password";

/// Seeds roles, users for every role and buku
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    println!("🌱 Starting full database seeding...");
    println!("   - Buku: {}", config.num_buku);
    println!("   - Users per role: {}", config.users_per_role);

    roles::seed_roles(db).await?;

    let password_hash = hash_seed_password()?;
    let users = users::seed_users(db, config.users_per_role, &password_hash).await?;

    let buku = buku::seed_buku(db, config.num_buku).await?;

    println!(
        "\n✅ Seeding complete! Created {} users and {} buku in {:?}",
        users.len(),
        buku.len(),
        start_time.elapsed()
    );
    println!("\n📝 Default password for all users: {}", DEFAULT_PASSWORD);

    Ok(())
}

/// Seeds only roles
pub async fn seed_roles_only(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    roles::seed_roles(db).await?;
    Ok(())
}

/// Seeds only buku
pub async fn seed_buku_only(db: &PgPool, count: usize) -> Result<(), Box<dyn std::error::Error>> {
    buku::seed_buku(db, count).await?;
    Ok(())
}

/// Clears all buku
pub async fn clear_buku_only(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    buku::clear_buku(db).await?;
    Ok(())
}

/// Clears generated buku and users. Roles are kept.
pub async fn clear_all(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🧹 Clearing seeded data...");

    buku::clear_buku(db).await?;
    users::clear_users(db).await?;

    println!("\n✅ Cleared seeded data in {:?}", start_time.elapsed());
    Ok(())
}

fn hash_seed_password() -> Result<String, Box<dyn std::error::Error>> {
    // Low cost keeps bulk seeding fast
    Ok(hash(DEFAULT_PASSWORD, 4)?)
}
