//! Application error type with HTTP response conversion.
//!
//! Every fallible handler and service in the API returns [`AppError`]. The
//! error carries the HTTP status it should be rendered with, the underlying
//! cause, and (for validation failures) a per-field message map.
//!
//! # Response Body
//!
//! ```json
//! { "message": "Invalid credentials" }
//! ```
//!
//! Validation failures additionally list every invalid field:
//!
//! ```json
//! {
//!   "message": "The judul field is required. (and 1 more error)",
//!   "errors": {
//!     "judul": ["The judul field is required."],
//!     "tahun_terbit": ["The tahun_terbit field must be an integer."]
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::ValidationErrors;

/// Field name to the list of messages describing why it was rejected.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    pub errors: Option<FieldErrors>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            errors: None,
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, anyhow::anyhow!(message))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message))
    }

    pub fn forbidden(message: String) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message))
    }

    /// Builds a 422 error listing every invalid field.
    ///
    /// The top-level message is the first field message, followed by a count
    /// of the remaining ones.
    pub fn validation(errors: &ValidationErrors) -> Self {
        let fields = field_messages(errors);

        let mut messages = fields.values().flatten();
        let first = messages
            .next()
            .cloned()
            .unwrap_or_else(|| "The given data was invalid.".to_string());
        let remaining = messages.count();

        let summary = match remaining {
            0 => first,
            1 => format!("{} (and 1 more error)", first),
            n => format!("{} (and {} more errors)", first, n),
        };

        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error: anyhow::anyhow!(summary),
            errors: Some(fields),
        }
    }

    /// The message exposed to clients. Server errors never leak their cause.
    pub fn message(&self) -> String {
        if self.status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        }
    }
}

fn field_messages(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let field = field.to_string();
            let messages = errors
                .iter()
                .map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("The {} field is invalid.", field))
                })
                .collect();
            (field, messages)
        })
        .collect()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
        }

        let message = self.message();
        let body = match self.errors {
            Some(errors) => json!({ "message": message, "errors": errors }),
            None => json!({ "message": message }),
        };

        (self.status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
