//! Authentication DTOs.
//!
//! Registration is validated in two passes: the shape checks below, then the
//! uniqueness and existence checks that need the database. Both passes add to
//! the same [`ValidationErrors`] so a client sees every failure at once.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::ValidationErrors;

use pustaka_core::validation::{
    collect, email as valid_email, max_chars, min_chars, required_integer, required_secret,
    required_string,
};

use crate::ids::RoleId;
use crate::users::User;

pub const NAME_MAX_CHARS: usize = 255;
pub const EMAIL_MAX_CHARS: usize = 255;
pub const PASSWORD_MIN_CHARS: usize = 8;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(value_type = String, example = "Ani Wijaya")]
    pub name: Option<Value>,
    #[schema(value_type = String, example = "ani@example.com")]
    pub email: Option<Value>,
    #[schema(value_type = String, example = "password123")]
    pub password: Option<Value>,
    #[schema(value_type = i64, example = 3)]
    pub role_id: Option<Value>,
}

/// Registration fields after the shape checks. A field is `None` when it
/// failed, in which case `errors` holds the reason.
#[derive(Debug)]
pub struct RegisterDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role_id: Option<RoleId>,
    pub errors: ValidationErrors,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFields {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role_id: RoleId,
}

impl RegisterRequest {
    pub fn check(self) -> RegisterDraft {
        let mut errors = ValidationErrors::new();

        let name = collect(
            &mut errors,
            "name",
            required_string("name", self.name.as_ref())
                .and_then(|v| max_chars("name", v, NAME_MAX_CHARS)),
        );
        let email = collect(
            &mut errors,
            "email",
            required_string("email", self.email.as_ref())
                .and_then(|v| valid_email("email", v))
                .and_then(|v| max_chars("email", v, EMAIL_MAX_CHARS)),
        );
        let password = collect(
            &mut errors,
            "password",
            required_secret("password", self.password.as_ref())
                .and_then(|v| min_chars("password", v, PASSWORD_MIN_CHARS)),
        );
        let role_id = collect(
            &mut errors,
            "role_id",
            required_integer("role_id", self.role_id.as_ref()).map(RoleId::new),
        );

        RegisterDraft {
            name,
            email,
            password,
            role_id,
            errors,
        }
    }
}

impl RegisterDraft {
    pub fn finish(self) -> Result<RegisterFields, ValidationErrors> {
        if !self.errors.errors().is_empty() {
            return Err(self.errors);
        }

        match (self.name, self.email, self.password, self.role_id) {
            (Some(name), Some(email), Some(password), Some(role_id)) => Ok(RegisterFields {
                name,
                email,
                password,
                role_id,
            }),
            _ => Err(self.errors),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(value_type = String, example = "ani@example.com")]
    pub email: Option<Value>,
    #[schema(value_type = String, example = "password123")]
    pub password: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginFields {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn into_fields(self) -> Result<LoginFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let email = collect(
            &mut errors,
            "email",
            required_string("email", self.email.as_ref()).and_then(|v| valid_email("email", v)),
        );
        let password = collect(
            &mut errors,
            "password",
            required_secret("password", self.password.as_ref()),
        );

        match (email, password) {
            (Some(email), Some(password)) => Ok(LoginFields { email, password }),
            _ => Err(errors),
        }
    }
}

/// Returned by register and login.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}
