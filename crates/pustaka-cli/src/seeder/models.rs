//! Data models for database seeding configuration.

use pustaka_models::RoleId;

/// Seed data for creating a buku.
#[derive(Debug, Clone)]
pub struct BukuSeed {
    pub judul: String,
    pub penulis: String,
    pub tahun_terbit: i32,
    pub deskripsi: String,
}

/// Seed data for creating a user.
#[derive(Debug, Clone)]
pub struct UserSeed {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: RoleId,
}

/// Complete configuration for database seeding.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub num_buku: usize,
    pub users_per_role: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            num_buku: 50,
            users_per_role: 2,
        }
    }
}

impl SeedConfig {
    /// Creates a new seed configuration with the specified number of buku.
    pub fn new(num_buku: usize) -> Self {
        Self {
            num_buku,
            ..Default::default()
        }
    }

    pub fn with_users_per_role(mut self, users_per_role: usize) -> Self {
        self.users_per_role = users_per_role;
        self
    }
}
