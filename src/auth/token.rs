//! OAuth2 client-credentials token acquisition.

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{Error, Result};

/// A bearer token issued by the token endpoint.
pub struct AccessToken {
    secret: SecretString,
    token_type: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// The raw bearer token.
    pub fn secret(&self) -> &str {
        self.secret.expose_secret()
    }

    /// Token type reported by the server (normally `Bearer`).
    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    /// When the token expires, if the server said so.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Check if the token has expired. Tokens without an expiry never do.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Utc::now() >= at)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Obtains bearer tokens with the `client_credentials` grant.
///
/// Every call to [`access_token`](Self::access_token) performs a fresh round
/// trip to the token endpoint; tokens are never cached.
pub struct TokenProvider {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: SecretString,
}

impl TokenProvider {
    pub(crate) fn new(
        http: reqwest::Client,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: SecretString,
    ) -> Self {
        Self {
            http,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret,
        }
    }

    /// The token endpoint this provider talks to.
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Request a new access token.
    ///
    /// Authenticates with HTTP Basic (`client_id:client_secret`) and posts
    /// `grant_type=client_credentials` as a form body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] if the endpoint is unreachable,
    /// answers with a non-2xx status, or its response lacks `access_token`.
    pub async fn access_token(&self) -> Result<AccessToken> {
        tracing::debug!(token_url = %self.token_url, "Requesting access token");

        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(self.client_secret.expose_secret()))
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| Error::Authentication(format!("Token endpoint unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = match response.bytes().await {
                Ok(body) => excerpt(&String::from_utf8_lossy(&body)),
                Err(e) => format!("<unreadable body: {}>", e),
            };
            tracing::warn!(status = status.as_u16(), "Token request rejected");
            return Err(Error::Authentication(format!(
                "Token request failed ({}): {}",
                status.as_u16(),
                detail
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Authentication(format!("Failed to read token response: {}", e)))?;
        let token_response: TokenResponse = serde_json::from_slice(&bytes)
            .map_err(|e| Error::Authentication(format!("Malformed token response: {}", e)))?;

        token_response.into_access_token()
    }
}

/// Longest token-endpoint body, in characters, copied into an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Trim `body` to at most [`MAX_ERROR_BODY_CHARS`] characters.
fn excerpt(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}... ({} bytes)", &body[..cut], body.len()),
        None => body.to_string(),
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenResponse {
    fn into_access_token(self) -> Result<AccessToken> {
        let access_token = self
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                Error::Authentication("Token response did not contain access_token".to_string())
            })?;

        Ok(AccessToken {
            secret: SecretString::from(access_token),
            token_type: self.token_type,
            expires_at: self
                .expires_in
                .map(|secs| Utc::now() + Duration::seconds(secs)),
        })
    }
}
