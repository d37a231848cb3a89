//! Error types for the Billpay API client.
//!
//! Every public operation returns [`Result`], and every failure surfaces
//! synchronously as one of the [`Error`] variants below. Nothing is retried
//! and nothing is swallowed.

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for Billpay operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Billpay API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid construction-time configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token acquisition failed (unreachable endpoint, non-2xx, no `access_token`)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Request signing failed (no private key configured, or malformed key)
    #[error("Signing error: {0}")]
    Signing(String),

    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned a non-success response
    #[error("API error: status={status}, message={message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Human-readable error message
        message: String,
        /// Raw response body, or the body text wrapped in a string when it is not JSON
        body: Value,
    },

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Returns `true` if this is an authentication-related error.
    ///
    /// # Example
    ///
    /// ```
    /// use billpay_rs::Error;
    ///
    /// assert!(Error::Authentication("token endpoint returned 401".into()).is_auth_error());
    /// assert!(!Error::Config("client_id is required".into()).is_auth_error());
    /// ```
    pub fn is_auth_error(&self) -> bool {
        match self {
            Error::Authentication(_) => true,
            Error::Api { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (bad configuration, missing key, bad request, etc.).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 400 && *status < 500,
            Error::Config(_) | Error::Signing(_) | Error::InvalidInput(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Create an API error from a response.
    ///
    /// JSON:API error bodies carry `errors[0].detail` or `errors[0].title`;
    /// plain `{"message": ...}` bodies are understood as well.
    pub(crate) fn from_api_response(status: u16, body: Value) -> Self {
        let first_error = body.get("errors").and_then(|e| e.get(0));

        let message = first_error
            .and_then(|e| e.get("detail").or_else(|| e.get("title")))
            .or_else(|| body.get("message"))
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown API error")
            .to_string();

        Error::Api {
            status,
            message,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_auth() {
        assert!(Error::Authentication("failed".into()).is_auth_error());
        assert!(Error::from_api_response(401, Value::Null).is_auth_error());
        assert!(!Error::Signing("no key".into()).is_auth_error());
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::Config("missing".into()).is_client_error());
        assert!(Error::Signing("no key".into()).is_client_error());
        assert!(Error::from_api_response(422, Value::Null).is_client_error());
        assert!(Error::from_api_response(502, Value::Null).is_server_error());
        assert!(!Error::from_api_response(502, Value::Null).is_client_error());
    }

    #[test]
    fn test_from_api_response_jsonapi_errors() {
        let body = serde_json::json!({
            "errors": [{
                "status": "422",
                "title": "Unprocessable Entity",
                "detail": "Client number is not registered"
            }]
        });

        let err = Error::from_api_response(422, body);
        match err {
            Error::Api {
                status, message, ..
            } => {
                assert_eq!(status, 422);
                assert_eq!(message, "Client number is not registered");
            }
            _ => panic!("Expected Api error"),
        }
    }

    #[test]
    fn test_from_api_response_plain_message() {
        let body = serde_json::json!({ "message": "Product not found" });
        match Error::from_api_response(404, body) {
            Error::Api { message, .. } => assert_eq!(message, "Product not found"),
            _ => panic!("Expected Api error"),
        }
    }

    #[test]
    fn test_from_api_response_unknown_shape() {
        match Error::from_api_response(500, Value::String("oops".into())) {
            Error::Api { message, body, .. } => {
                assert_eq!(message, "Unknown API error");
                assert_eq!(body, Value::String("oops".into()));
            }
            _ => panic!("Expected Api error"),
        }
    }
}
