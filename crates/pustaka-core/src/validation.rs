//! Field-level validation helpers for loosely-typed JSON payloads.
//!
//! Request bodies that must report *every* invalid field (including type
//! mismatches such as `"tahun_terbit": "invalid"`) are deserialized into
//! structs of `Option<serde_json::Value>` fields. Each field is then checked
//! with the helpers below and the failures are gathered into a single
//! [`ValidationErrors`] with [`collect`].
//!
//! Strings are trimmed and an empty or whitespace-only string counts as a
//! missing value.
//!
//! # Example
//!
//! ```ignore
//! let mut errors = ValidationErrors::new();
//! let judul = collect(&mut errors, "judul", required_string("judul", dto.judul.as_ref()));
//! let tahun = collect(&mut errors, "tahun_terbit", required_integer("tahun_terbit", dto.tahun_terbit.as_ref()));
//!
//! if !errors.errors().is_empty() {
//!     return Err(AppError::validation(&errors));
//! }
//! ```

use serde_json::Value;
use validator::{ValidateEmail, ValidationError, ValidationErrors};

/// Creates a [`ValidationError`] with a client-facing message.
pub fn field_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

pub fn required(field: &str) -> ValidationError {
    field_error("required", format!("The {} field is required.", field))
}

/// Records a failed check under `field` and returns the value of a passing one.
pub fn collect<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    result: Result<T, ValidationError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            errors.add(field, error);
            None
        }
    }
}

/// A present, non-blank JSON string. The returned value is trimmed.
pub fn required_string(field: &str, value: Option<&Value>) -> Result<String, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(required(field)),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Err(required(field))
            } else {
                Ok(trimmed.to_string())
            }
        }
        Some(_) => Err(field_error(
            "string",
            format!("The {} field must be a string.", field),
        )),
    }
}

/// Like [`required_string`] but keeps surrounding whitespace, for secrets.
pub fn required_secret(field: &str, value: Option<&Value>) -> Result<String, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(required(field)),
        Some(Value::String(s)) if s.is_empty() => Err(required(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(field_error(
            "string",
            format!("The {} field must be a string.", field),
        )),
    }
}

/// A JSON integer, or a string holding one. Floats with no fractional part
/// such as `2024.0` count as integers.
pub fn required_integer(field: &str, value: Option<&Value>) -> Result<i64, ValidationError> {
    let not_integer = || {
        field_error(
            "integer",
            format!("The {} field must be an integer.", field),
        )
    };

    match value {
        None | Some(Value::Null) => Err(required(field)),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(integral))
            .ok_or_else(not_integer),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(required(field));
            }
            trimmed.parse::<i64>().map_err(|_| not_integer())
        }
        Some(_) => Err(not_integer()),
    }
}

fn integral(value: f64) -> Option<i64> {
    // i64::MAX is not exactly representable, so the upper bound is exclusive
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.fract() == 0.0 && in_range).then_some(value as i64)
}

/// Narrows a checked integer to a 32-bit column value.
pub fn as_i32(field: &str, value: i64) -> Result<i32, ValidationError> {
    i32::try_from(value).map_err(|_| {
        field_error(
            "integer",
            format!("The {} field must be an integer.", field),
        )
    })
}

pub fn max_chars(field: &str, value: String, max: usize) -> Result<String, ValidationError> {
    if value.chars().count() > max {
        Err(field_error(
            "max",
            format!(
                "The {} field must not be greater than {} characters.",
                field, max
            ),
        ))
    } else {
        Ok(value)
    }
}

pub fn min_chars(field: &str, value: String, min: usize) -> Result<String, ValidationError> {
    if value.chars().count() < min {
        Err(field_error(
            "min",
            format!("The {} field must be at least {} characters.", field, min),
        ))
    } else {
        Ok(value)
    }
}

pub fn email(field: &str, value: String) -> Result<String, ValidationError> {
    if value.validate_email() {
        Ok(value)
    } else {
        Err(field_error(
            "email",
            format!("The {} field must be a valid email address.", field),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn code(result: Result<impl std::fmt::Debug, ValidationError>) -> String {
        result.unwrap_err().code.to_string()
    }

    #[test]
    fn test_required_string_accepts_and_trims() {
        let value = json!("  Laskar Pelangi  ");
        assert_eq!(
            required_string("judul", Some(&value)).unwrap(),
            "Laskar Pelangi"
        );
    }

    #[test]
    fn test_required_string_rejects_missing_and_blank() {
        assert_eq!(code(required_string("judul", None)), "required");
        assert_eq!(code(required_string("judul", Some(&Value::Null))), "required");
        assert_eq!(code(required_string("judul", Some(&json!("")))), "required");
        assert_eq!(code(required_string("judul", Some(&json!("   ")))), "required");
    }

    #[test]
    fn test_required_string_rejects_non_strings() {
        assert_eq!(code(required_string("judul", Some(&json!(42)))), "string");
        assert_eq!(code(required_string("judul", Some(&json!(["a"])))), "string");
    }

    #[test]
    fn test_required_secret_keeps_whitespace() {
        let value = json!(" secret ");
        assert_eq!(
            required_secret("password", Some(&value)).unwrap(),
            " secret "
        );
        assert_eq!(code(required_secret("password", Some(&json!("")))), "required");
    }

    #[test]
    fn test_required_integer_variants() {
        assert_eq!(required_integer("tahun_terbit", Some(&json!(2024))).unwrap(), 2024);
        assert_eq!(
            required_integer("tahun_terbit", Some(&json!("1998"))).unwrap(),
            1998
        );
        assert_eq!(code(required_integer("tahun_terbit", Some(&json!("invalid")))), "integer");
        assert_eq!(code(required_integer("tahun_terbit", Some(&json!(20.5)))), "integer");
        assert_eq!(code(required_integer("tahun_terbit", Some(&json!(1e300)))), "integer");
        assert_eq!(code(required_integer("tahun_terbit", Some(&json!(true)))), "integer");
        assert_eq!(code(required_integer("tahun_terbit", None)), "required");
    }

    #[test]
    fn test_required_integer_accepts_integral_floats() {
        assert_eq!(
            required_integer("tahun_terbit", Some(&json!(2024.0))).unwrap(),
            2024
        );
        assert_eq!(required_integer("role_id", Some(&json!(-3.0))).unwrap(), -3);
    }

    #[test]
    fn test_as_i32_bounds() {
        assert_eq!(as_i32("tahun_terbit", 2024).unwrap(), 2024);
        assert!(as_i32("tahun_terbit", i64::from(i32::MAX) + 1).is_err());
    }

    #[test]
    fn test_length_checks() {
        assert!(min_chars("password", "123".to_string(), 8).is_err());
        assert!(min_chars("password", "password123".to_string(), 8).is_ok());
        assert!(max_chars("name", "x".repeat(256), 255).is_err());
        assert!(max_chars("name", "x".repeat(255), 255).is_ok());
    }

    #[test]
    fn test_email_check() {
        assert!(email("email", "reader@example.com".to_string()).is_ok());
        let error = email("email", "invalid-email".to_string()).unwrap_err();
        assert_eq!(
            error.message.unwrap(),
            "The email field must be a valid email address."
        );
    }

    #[test]
    fn test_collect_gathers_every_failure() {
        let mut errors = ValidationErrors::new();
        let judul = collect(&mut errors, "judul", required_string("judul", None));
        let tahun = collect(
            &mut errors,
            "tahun_terbit",
            required_integer("tahun_terbit", Some(&json!(2024))),
        );
        let penulis = collect(
            &mut errors,
            "penulis",
            required_string("penulis", Some(&json!(""))),
        );

        assert!(judul.is_none());
        assert_eq!(tahun, Some(2024));
        assert!(penulis.is_none());

        let fields = errors.field_errors();
        assert_eq!(fields.len(), 2);
        assert!(fields.contains_key("judul"));
        assert!(fields.contains_key("penulis"));
    }
}
