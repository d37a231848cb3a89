//! Product catalogue service.

use serde_json::Value;
use std::sync::Arc;

use crate::client::ClientInner;
use crate::Result;

/// Service for product catalogue operations.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: billpay_rs::BillpayClient) -> billpay_rs::Result<()> {
/// let products = client.products().list().await?;
/// if let Some(items) = products["data"].as_array() {
///     for item in items {
///         println!("{}", item["attributes"]["code"]);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct ProductsService {
    inner: Arc<ClientInner>,
}

impl ProductsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List every product available to this client.
    pub async fn list(&self) -> Result<Value> {
        self.inner.get("v2/product-list").await
    }
}
