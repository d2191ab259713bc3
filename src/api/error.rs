//! Unified API error handling.
//!
//! Every failing response carries the same JSON envelope with an `error`
//! message and an HTTP status matching the error kind. Infrastructure
//! faults are redacted at the wire and logged in full instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::token::TokenError;

/// The error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing or blank (400).
    #[error("{0}")]
    Validation(String),

    /// Wrong username or password (401). One message covers both cases so
    /// callers cannot probe which usernames exist.
    #[error("Invalid credentials")]
    Authentication,

    /// Identity store failure (500).
    #[error("identity store error: {0}")]
    Store(#[from] sqlx::Error),

    /// Token signing failure or missing secret (500).
    #[error("token signing error: {0}")]
    Signing(#[from] TokenError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Authentication => StatusCode::UNAUTHORIZED,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent over the wire. Store and signing faults get a generic
    /// message; the underlying error only goes to the logs.
    fn public_message(&self) -> String {
        match self {
            ApiError::Validation(msg) => msg.clone(),
            ApiError::Authentication => "Invalid credentials".to_string(),
            ApiError::Store(_) => "Internal server error".to_string(),
            ApiError::Signing(_) => "Failed to generate token".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Store(e) => tracing::error!(error = %e, "identity store failure"),
            ApiError::Signing(e) => tracing::error!(error = %e, "token signing failure"),
            _ => {}
        }

        let body = ErrorResponse {
            error: self.public_message(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Validation("missing".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Authentication.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Store(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Signing(TokenError::MissingSecret).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_infrastructure_messages_are_redacted() {
        let msg = ApiError::Store(sqlx::Error::RowNotFound).public_message();
        assert_eq!(msg, "Internal server error");

        let msg = ApiError::Signing(TokenError::MissingSecret).public_message();
        assert_eq!(msg, "Failed to generate token");
    }

    #[test]
    fn test_authentication_message_is_fixed() {
        assert_eq!(
            ApiError::Authentication.public_message(),
            "Invalid credentials"
        );
    }

    #[tokio::test]
    async fn test_error_envelope_shape() {
        let response = ApiError::Authentication.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "Invalid credentials");
    }
}
