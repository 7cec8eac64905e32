//! Role seeding.
//!
//! Inserts the fixed `admin`, `editor` and `viewer` rows. Running it again is
//! a no-op.

use pustaka_models::{Role, RoleId, RoleName};
use sqlx::PgPool;
use std::time::Instant;

/// Inserts every known role that is missing and returns all of them.
pub async fn seed_roles(db: &PgPool) -> Result<Vec<Role>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🔐 Seeding roles...");

    let names: Vec<&str> = RoleName::ALL.iter().map(|role| role.as_str()).collect();

    let inserted = sqlx::query(
        "INSERT INTO roles (name)
         SELECT * FROM UNNEST($1::text[])
         ON CONFLICT (name) DO NOTHING",
    )
    .bind(&names)
    .execute(db)
    .await?
    .rows_affected();

    let roles = sqlx::query_as::<_, Role>(
        "SELECT id, name, created_at, updated_at FROM roles ORDER BY id",
    )
    .fetch_all(db)
    .await?;

    println!(
        "   ✓ Inserted {} new roles ({} total) in {:?}",
        inserted,
        roles.len(),
        start_time.elapsed()
    );

    Ok(roles)
}

/// Looks up the ID of a seeded role.
pub async fn find_role_id(
    db: &PgPool,
    role: RoleName,
) -> Result<RoleId, Box<dyn std::error::Error>> {
    let id = sqlx::query_scalar::<_, RoleId>("SELECT id FROM roles WHERE name = $1")
        .bind(role.as_str())
        .fetch_optional(db)
        .await?;

    id.ok_or_else(|| format!("Role '{}' not found. Run `seed-roles` first.", role).into())
}
