//! HTTP client implementation for the Billpay API.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

use crate::api::{BillsService, OrdersService, ProductsService};
use crate::auth::{Credentials, Signer, TokenProvider};
use crate::models::{ClientNumber, Document, Fields, OrderId, ProductCode};
use crate::{Error, Result};

use super::config::ClientConfig;

/// Name of the header carrying the request signature.
pub(crate) const SIGNATURE_HEADER: &str = "Signature";

/// The main client for interacting with the Billpay API.
///
/// The client owns its configuration and credentials for its whole lifetime.
/// Every operation fetches a fresh bearer token and then makes exactly one
/// resource request; there is no retry and no token caching.
///
/// # Example
///
/// ```no_run
/// use billpay_rs::{BillpayClient, ClientConfig, Credentials};
/// use billpay_rs::models::Fields;
///
/// # async fn example() -> billpay_rs::Result<()> {
/// let pem = std::fs::read_to_string("private_key.pem").unwrap();
/// let credentials = Credentials::new("client-id", "client-secret")?.with_private_key(pem);
/// let client = BillpayClient::new(credentials, ClientConfig::default())?;
///
/// let bill = client
///     .inquiry("pdam-jabar-kota-cirebon", "0811111111", Fields::new())
///     .await?;
/// println!("{}", bill["data"]["attributes"]);
///
/// let order = client
///     .checkout("order123111", "pdam-jabar-kota-cirebon", "0811111111", 51750, Fields::new())
///     .await?;
/// let status = client.check_status("order123111").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BillpayClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) tokens: TokenProvider,
    pub(crate) signer: Option<Signer>,
    pub(crate) config: ClientConfig,
    base_url: Url,
}

impl BillpayClient {
    /// Create a new client.
    ///
    /// No network call is made. The private key, if any, is parsed here.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if `base_url` is not a valid absolute URL
    /// - [`Error::Signing`] if the private key cannot be parsed
    /// - [`Error::Http`] if the HTTP client cannot be built
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let base_url = config.base_url.clone();
        let config = config.with_base_url(base_url);
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::Config(format!("Invalid base_url {}: {}", config.base_url, e)))?;

        let (client_id, client_secret, private_key) = credentials.into_parts();
        let signer = private_key
            .as_ref()
            .map(|pem| Signer::from_pem(pem.expose_secret()))
            .transpose()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let tokens = TokenProvider::new(
            http.clone(),
            config.token_url.clone(),
            client_id,
            client_secret,
        );

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                tokens,
                signer,
                config,
                base_url,
            }),
        })
    }

    /// Create a client from `BILLPAY_*` environment variables.
    ///
    /// See [`Credentials::from_env`] and [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(Credentials::from_env()?, ClientConfig::from_env()?)
    }

    /// Get the products service.
    pub fn products(&self) -> ProductsService {
        ProductsService::new(self.inner.clone())
    }

    /// Get the bill inquiry service.
    pub fn bills(&self) -> BillsService {
        BillsService::new(self.inner.clone())
    }

    /// Get the orders service.
    pub fn orders(&self) -> OrdersService {
        OrdersService::new(self.inner.clone())
    }

    /// List available products (`GET v2/product-list`).
    pub async fn product_list(&self) -> Result<Value> {
        self.products().list().await
    }

    /// Inquire a bill (`POST v2/inquiry`, unsigned).
    ///
    /// Pass [`Fields::new()`] when the product needs no extra fields.
    pub async fn inquiry(
        &self,
        product_code: impl Into<ProductCode>,
        client_number: impl Into<ClientNumber>,
        fields: Fields,
    ) -> Result<Value> {
        self.bills().inquiry(product_code, client_number, fields).await
    }

    /// Create an order (`POST v2/order`, signed).
    ///
    /// An `amount` of 0 leaves the amount to the biller.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Signing`] before any network call if the client was
    /// built without a private key.
    pub async fn checkout(
        &self,
        id: impl Into<OrderId>,
        product_code: impl Into<ProductCode>,
        client_number: impl Into<ClientNumber>,
        amount: u64,
        fields: Fields,
    ) -> Result<Value> {
        self.orders()
            .checkout(id, product_code, client_number, amount, fields)
            .await
    }

    /// Check an order's status (`GET v2/order/{id}`).
    pub async fn check_status(&self, id: impl Into<OrderId>) -> Result<Value> {
        self.orders().status(&id.into()).await
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Get the token provider.
    pub fn token_provider(&self) -> &TokenProvider {
        &self.inner.tokens
    }

    /// Get the request signer, if a private key was configured.
    pub fn signer(&self) -> Option<&Signer> {
        self.inner.signer.as_ref()
    }
}

impl ClientInner {
    /// Resolve a resource path against the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Resolve `prefix` against the base URL and append `segment` as one
    /// percent-encoded path segment.
    ///
    /// `/`, `?` and `#` inside the segment are escaped, so it can never
    /// address a different resource.
    pub(crate) fn url_with_segment(&self, prefix: &str, segment: &str) -> Result<Url> {
        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(Error::InvalidInput(format!(
                "Invalid path segment: {:?}",
                segment
            )));
        }

        let mut url = self.url(prefix)?;
        url.path_segments_mut()
            .map_err(|_| {
                Error::Config(format!("base_url cannot hold a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    /// Fetch a token and build request headers with authentication.
    pub(crate) async fn build_headers(&self) -> Result<HeaderMap> {
        let token = self.tokens.access_token().await?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token.secret()))
                .map_err(|_| Error::InvalidInput("Invalid token format".to_string()))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(headers)
    }

    /// Make a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path)?;
        self.get_url(url).await
    }

    /// Make a GET request for `prefix` followed by one escaped `segment`.
    pub(crate) async fn get_segment<T: DeserializeOwned>(
        &self,
        prefix: &str,
        segment: &str,
    ) -> Result<T> {
        let url = self.url_with_segment(prefix, segment)?;
        self.get_url(url).await
    }

    async fn get_url<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let headers = self.build_headers().await?;

        tracing::debug!(method = "GET", path = url.path(), "Sending request");
        let response = self.http.get(url).headers(headers).send().await?;

        self.handle_response(response).await
    }

    /// Make an unsigned POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned, R: Serialize>(
        &self,
        path: &str,
        document: &Document<R>,
    ) -> Result<T> {
        let body = document.to_bytes()?;
        self.send_post(path, body, None).await
    }

    /// Make a POST request whose body is signed.
    ///
    /// The signature is computed before any network traffic, so a missing
    /// key fails without contacting the token endpoint.
    pub(crate) async fn post_signed<T: DeserializeOwned, R: Serialize>(
        &self,
        path: &str,
        document: &Document<R>,
    ) -> Result<T> {
        let signer = self.signer.as_ref().ok_or_else(|| {
            Error::Signing("A private key is required for signed requests".to_string())
        })?;

        let body = document.to_bytes()?;
        let signature = signer.sign(&body)?;
        self.send_post(path, body, Some(signature)).await
    }

    async fn send_post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Vec<u8>,
        signature: Option<String>,
    ) -> Result<T> {
        let url = self.url(path)?;
        let mut headers = self.build_headers().await?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(signature) = signature {
            headers.insert(
                SIGNATURE_HEADER,
                HeaderValue::from_str(&signature)
                    .map_err(|_| Error::InvalidInput("Invalid signature format".to_string()))?,
            );
        }

        tracing::debug!(
            method = "POST",
            path,
            signed = headers.contains_key(SIGNATURE_HEADER),
            "Sending request"
        );
        let response = self
            .http
            .post(url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle an API response.
    ///
    /// Success bodies are decoded as-is. Failures carry the body as JSON
    /// when possible, or as a JSON string of the raw text otherwise.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let bytes = response.bytes().await?;

        tracing::debug!(status = status.as_u16(), len = bytes.len(), "Received response");

        if status.is_success() {
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            let body = serde_json::from_slice::<Value>(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
            Err(Error::from_api_response(status.as_u16(), body))
        }
    }
}

impl std::fmt::Debug for BillpayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BillpayClient")
            .field("config", &self.inner.config)
            .field("signing", &self.inner.signer.is_some())
            .finish()
    }
}
