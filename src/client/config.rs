//! Client configuration options.

use std::time::Duration;

use crate::{Error, Result};

/// Production OAuth2 token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://api.billpay.id/oauth/token";

/// Production API root. Resource paths such as `v2/inquiry` are joined under it.
pub const DEFAULT_BASE_URL: &str = "https://api.billpay.id/";

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the Billpay client.
///
/// Immutable once handed to [`BillpayClient::new`](crate::BillpayClient::new).
///
/// # Example
///
/// ```
/// use billpay_rs::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_base_url("https://sandbox.billpay.id")
///     .with_timeout(Duration::from_secs(30));
///
/// assert_eq!(config.base_url, "https://sandbox.billpay.id/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// OAuth2 token endpoint. Defaults to [`DEFAULT_TOKEN_URL`].
    pub token_url: String,
    /// API root, always ending in `/`. Defaults to [`DEFAULT_BASE_URL`].
    pub base_url: String,
    /// Overall request timeout, applied to token and resource calls alike.
    /// Defaults to 10 seconds.
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("billpay-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from the environment.
    ///
    /// Reads the optional `BILLPAY_TOKEN_URL`, `BILLPAY_BASE_URL` and
    /// `BILLPAY_TIMEOUT_SECS` variables; anything unset keeps its default.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(token_url) = std::env::var("BILLPAY_TOKEN_URL") {
            config = config.with_token_url(token_url);
        }
        if let Ok(base_url) = std::env::var("BILLPAY_BASE_URL") {
            config = config.with_base_url(base_url);
        }
        if let Ok(timeout) = std::env::var("BILLPAY_TIMEOUT_SECS") {
            let secs = timeout.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!("BILLPAY_TIMEOUT_SECS is not a number: {timeout}"))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Set the OAuth2 token endpoint.
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Set the API root.
    ///
    /// A trailing `/` is appended when missing so that relative resource
    /// paths resolve underneath it rather than replacing its last segment.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("billpay-rs/"));
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = ClientConfig::new().with_base_url("http://127.0.0.1:8080/api");
        assert_eq!(config.base_url, "http://127.0.0.1:8080/api/");

        let config = ClientConfig::new().with_base_url("http://127.0.0.1:8080/");
        assert_eq!(config.base_url, "http://127.0.0.1:8080/");
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new()
            .with_token_url("http://localhost/token")
            .with_timeout(Duration::from_secs(3))
            .with_user_agent("my-app/1.0");

        assert_eq!(config.token_url, "http://localhost/token");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.user_agent, "my-app/1.0");
    }

    mod from_env {
        use super::*;
        use crate::test_env::with_vars;

        #[test]
        fn test_unset_vars_keep_defaults() {
            let config = with_vars(
                &[
                    ("BILLPAY_TOKEN_URL", None),
                    ("BILLPAY_BASE_URL", None),
                    ("BILLPAY_TIMEOUT_SECS", None),
                ],
                ClientConfig::from_env,
            )
            .unwrap();

            assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
            assert_eq!(config.base_url, DEFAULT_BASE_URL);
            assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        }

        #[test]
        fn test_set_vars_are_applied() {
            let config = with_vars(
                &[
                    ("BILLPAY_TOKEN_URL", Some("http://localhost:9000/token")),
                    ("BILLPAY_BASE_URL", Some("http://localhost:9000/api")),
                    ("BILLPAY_TIMEOUT_SECS", Some(" 30 ")),
                ],
                ClientConfig::from_env,
            )
            .unwrap();

            assert_eq!(config.token_url, "http://localhost:9000/token");
            assert_eq!(config.base_url, "http://localhost:9000/api/");
            assert_eq!(config.timeout, Duration::from_secs(30));
        }

        #[test]
        fn test_non_numeric_timeout_is_config_error() {
            for timeout in ["ten", "-5", "1.5", ""] {
                let err = with_vars(
                    &[("BILLPAY_TIMEOUT_SECS", Some(timeout))],
                    ClientConfig::from_env,
                )
                .unwrap_err();
                assert!(matches!(err, Error::Config(_)), "{:?}", err);
            }
        }
    }
}
