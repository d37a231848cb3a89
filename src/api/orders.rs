//! Orders service for checkout and status polling.

use serde_json::Value;
use std::sync::Arc;

use crate::client::ClientInner;
use crate::models::{ClientNumber, Fields, OrderDocument, OrderId, ProductCode};
use crate::Result;

/// Service for order operations.
///
/// Order creation is the only state-changing call in the API, and the only
/// one whose body is signed; the client must have been built with a
/// private key.
///
/// # Example
///
/// ```no_run
/// use billpay_rs::OrderId;
/// use billpay_rs::models::Fields;
///
/// # async fn example(client: billpay_rs::BillpayClient) -> billpay_rs::Result<()> {
/// client
///     .orders()
///     .checkout("order123111", "pdam-jabar-kota-cirebon", "0811111111", 51750, Fields::new())
///     .await?;
///
/// let status = client.orders().status(&OrderId::new("order123111")).await?;
/// println!("Status: {}", status["data"]["attributes"]["status"]);
/// # Ok(())
/// # }
/// ```
pub struct OrdersService {
    inner: Arc<ClientInner>,
}

impl OrdersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Place an order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Signing`](crate::Error::Signing) without touching the
    /// network if no private key is configured.
    pub async fn checkout(
        &self,
        id: impl Into<OrderId>,
        product_code: impl Into<ProductCode>,
        client_number: impl Into<ClientNumber>,
        amount: u64,
        fields: Fields,
    ) -> Result<Value> {
        let document = OrderDocument::order(id, product_code, client_number, amount, fields);
        self.place(&document).await
    }

    /// Place a prebuilt order document.
    pub async fn place(&self, document: &OrderDocument) -> Result<Value> {
        self.inner.post_signed("v2/order", document).await
    }

    /// Get the current state of an order.
    ///
    /// The id is sent as a single escaped path segment of `v2/order/`.
    pub async fn status(&self, id: &OrderId) -> Result<Value> {
        self.inner.get_segment("v2/order/", id.as_str()).await
    }
}
