//! JSON body extractor that renders rejections as [`AppError`]s.
//!
//! Payloads are deserialized into `Option<Value>` fields and check their own
//! shape, so only syntax and content-type problems are rejected here.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use pustaka_core::AppError;

fn rejection_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => AppError::bad_request(anyhow!(
            "Missing 'Content-Type: application/json' header"
        )),
        other => {
            tracing::debug!(reason = %other.body_text(), "Rejected request body");
            AppError::bad_request(anyhow!("Invalid request body"))
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_error)?;

        Ok(JsonBody(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let JsonBody(payload) =
            JsonBody::<Payload>::from_request(json_request(r#"{"name":"Ani"}"#), &())
                .await
                .unwrap();
        assert_eq!(payload.name, "Ani");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let error = JsonBody::<Payload>::from_request(json_request("{not json"), &())
            .await
            .unwrap_err();

        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.message(), "Invalid request body");
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"name":"Ani"}"#))
            .unwrap();

        let error = JsonBody::<Payload>::from_request(req, &()).await.unwrap_err();
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert!(error.message().contains("Content-Type"));
    }
}
