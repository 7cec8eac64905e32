//! User seeding functionality.
//!
//! Provides functions for generating fake users for every role and for
//! creating a single named user.

use fake::Fake;
use fake::faker::name::en::*;
use pustaka_core::hash_password;
use pustaka_models::{RoleId, RoleName, User};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::UserSeed;
use super::roles::find_role_id;

const USER_COLUMNS: &str = "id, name, email, role_id, created_at, updated_at";

/// Email domain of every generated user. Clearing deletes this domain only.
pub const SEED_EMAIL_DOMAIN: &str = "seed.pustaka.test";

/// Generates `per_role` users for each given role, all sharing one password hash.
pub fn generate_users(
    roles: &[(RoleName, RoleId)],
    per_role: usize,
    password_hash: &str,
) -> Vec<UserSeed> {
    roles
        .par_iter()
        .flat_map(|&(role, role_id)| {
            (0..per_role)
                .map(|user_idx| generate_user(role, role_id, user_idx, password_hash))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn generate_user(role: RoleName, role_id: RoleId, user_idx: usize, password_hash: &str) -> UserSeed {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();

    // The role and index suffix keeps generated addresses unique
    let email = format!(
        "{}.{}+{}{}@{}",
        first_name.to_lowercase().replace(' ', ""),
        last_name.to_lowercase().replace(' ', ""),
        role,
        user_idx,
        SEED_EMAIL_DOMAIN
    );

    UserSeed {
        name: format!("{} {}", first_name, last_name),
        email,
        password_hash: password_hash.to_string(),
        role_id,
    }
}

/// Seeds fake users for every role into the database
pub async fn seed_users(
    db: &PgPool,
    per_role: usize,
    password_hash: &str,
) -> Result<Vec<User>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("👥 Seeding {} users per role...", per_role);

    let mut roles = Vec::with_capacity(RoleName::ALL.len());
    for role in RoleName::ALL {
        roles.push((role, find_role_id(db, role).await?));
    }

    let users = generate_users(&roles, per_role, password_hash);
    let inserted = insert_users_batch(db, &users).await?;

    println!(
        "   ✓ Inserted {} users in {:?}",
        inserted.len(),
        start_time.elapsed()
    );

    Ok(inserted)
}

/// Inserts users in batches using multi-value INSERT statements
pub async fn insert_users_batch(
    db: &PgPool,
    users: &[UserSeed],
) -> Result<Vec<User>, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    // 4 params per user
    const BATCH_SIZE: usize = 1000;
    let mut all = Vec::with_capacity(users.len());

    for chunk in users.chunks(BATCH_SIZE) {
        all.extend(insert_users_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;
    Ok(all)
}

async fn insert_users_chunk(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> Result<Vec<User>, Box<dyn std::error::Error>> {
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO users (name, email, password, role_id) VALUES ");

    for i in 0..users.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 4;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${})",
            param_idx + 1,
            param_idx + 2,
            param_idx + 3,
            param_idx + 4
        ));
    }

    query.push_str(" ON CONFLICT (email) DO NOTHING RETURNING ");
    query.push_str(USER_COLUMNS);

    let mut q = sqlx::query_as::<_, User>(&query);
    for user in users {
        q = q
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role_id);
    }

    Ok(q.fetch_all(&mut **tx).await?)
}

/// Creates a single user with the given role.
///
/// Fails when the role has not been seeded or the email is already taken.
pub async fn create_user(
    db: &PgPool,
    name: &str,
    email: &str,
    password: &str,
    role: RoleName,
) -> Result<User, Box<dyn std::error::Error>> {
    let role_id = find_role_id(db, role).await?;
    let hashed_password =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (name, email, password, role_id)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (email) DO NOTHING
         RETURNING {}",
        USER_COLUMNS
    ))
    .bind(name)
    .bind(email)
    .bind(&hashed_password)
    .bind(role_id)
    .fetch_optional(db)
    .await?;

    user.ok_or_else(|| "User with this email already exists".into())
}

/// Clears generated users. Registered accounts and users made with
/// [`create_user`] are kept.
pub async fn clear_users(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded users...");

    let result = sqlx::query("DELETE FROM users WHERE split_part(email, '@', 2) = $1")
        .bind(SEED_EMAIL_DOMAIN)
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} users in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
