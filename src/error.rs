//! Gate error type.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use derive_more::{Display, Error};

/// Error raised when a protected route is denied.
///
/// There is deliberately only one kind: a missing key, an unknown key and an
/// empty valid-key set all surface as the same `401 Unauthorized`, so a
/// caller learns nothing about why it was rejected. The error is never
/// retried internally and never mapped to a different status.
#[derive(Debug, Display, Error)]
pub enum ApiKeyError {
    /// No valid API key accompanied the request.
    #[display("Unauthorized: invalid or missing API key")]
    AuthenticationFailure,
}

impl ResponseError for ApiKeyError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiKeyError::AuthenticationFailure => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error = status.canonical_reason().unwrap_or("Error");
        let message = self.to_string();
        let body = format!(r#"{{"error":"{}","message":"{}"}}"#, error, message);

        HttpResponse::build(status)
            .content_type("application/json")
            .body(body)
    }
}
