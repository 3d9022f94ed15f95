use crate::services::providers::ProviderError;
use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message returned for every failure past validation.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch counter data.";

#[derive(Debug, Error)]
pub enum CounterError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Missing character name.")]
    MissingCharacter,

    /// Unparseable bodies share the provider-failure response.
    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// Bodies that cannot be read (e.g. over the size limit) fail the same way.
    #[error("Unreadable request body: {0}")]
    UnreadableBody(#[from] BytesRejection),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl CounterError {
    /// Outcome label used for metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            CounterError::MethodNotAllowed => "method_not_allowed",
            CounterError::MissingCharacter => "missing_character",
            CounterError::MalformedBody(_) => "malformed_body",
            CounterError::UnreadableBody(_) => "unreadable_body",
            CounterError::Provider(_) => "provider_error",
        }
    }
}

/// JSON envelope for failures past validation.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

impl IntoResponse for CounterError {
    fn into_response(self) -> Response {
        match self {
            CounterError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, self.to_string()).into_response()
            }
            CounterError::MissingCharacter => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            CounterError::MalformedBody(_)
            | CounterError::UnreadableBody(_)
            | CounterError::Provider(_) => {
                tracing::error!(error = %self, "API Error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorEnvelope {
                        error: FETCH_FAILED_MESSAGE.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn method_not_allowed_is_plain_text() {
        let response = CounterError::MethodNotAllowed.into_response();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        assert_eq!(body_string(response).await, "Method Not Allowed");
    }

    #[tokio::test]
    async fn missing_character_is_plain_text_400() {
        let response = CounterError::MissingCharacter.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(response).await, "Missing character name.");
    }

    #[tokio::test]
    async fn provider_failure_hides_details() {
        let err = CounterError::from(ProviderError::ApiError("quota exceeded for key".into()));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_string(response).await;
        assert_eq!(body, r#"{"error":"Failed to fetch counter data."}"#);
        assert!(!body.contains("quota"));
    }

    #[tokio::test]
    async fn malformed_body_maps_to_same_500() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let response = CounterError::from(parse_err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_string(response).await,
            r#"{"error":"Failed to fetch counter data."}"#
        );
    }
}
