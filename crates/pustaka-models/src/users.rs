//! User domain models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::ids::{RoleId, UserId};
use crate::roles::RoleName;

/// A user as exposed by the API. The password hash is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[schema(example = "reader@example.com")]
    pub email: String,
    pub role_id: RoleId,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// A user row including the stored bcrypt hash, used only for login.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role_id: RoleId,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserCredentials> for User {
    fn from(row: UserCredentials) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            role_id: row.role_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A user joined with the name of its role.
///
/// `role` stays a plain string so that a row whose role is not one of the
/// known [`RoleName`]s can still be loaded and then denied.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserWithRole {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub user: User,
    #[schema(example = "viewer")]
    pub role: String,
}

impl UserWithRole {
    pub fn role_name(&self) -> Option<RoleName> {
        self.role.parse().ok()
    }
}
