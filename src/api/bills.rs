//! Bill inquiry service.

use serde_json::Value;
use std::sync::Arc;

use crate::client::ClientInner;
use crate::models::{ClientNumber, Fields, InquiryDocument, ProductCode};
use crate::Result;

/// Service for bill inquiries.
///
/// An inquiry asks the biller what is owed for a customer number before an
/// order is placed. Inquiries are not signed.
///
/// # Example
///
/// ```no_run
/// use billpay_rs::models::Fields;
///
/// # async fn example(client: billpay_rs::BillpayClient) -> billpay_rs::Result<()> {
/// let bill = client
///     .bills()
///     .inquiry("pdam-jabar-kota-cirebon", "0811111111", Fields::new())
///     .await?;
/// println!("Amount due: {}", bill["data"]["attributes"]["amount"]);
/// # Ok(())
/// # }
/// ```
pub struct BillsService {
    inner: Arc<ClientInner>,
}

impl BillsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Inquire the bill for `client_number` on `product_code`.
    pub async fn inquiry(
        &self,
        product_code: impl Into<ProductCode>,
        client_number: impl Into<ClientNumber>,
        fields: Fields,
    ) -> Result<Value> {
        let document = InquiryDocument::inquiry(product_code, client_number, fields);
        self.send(&document).await
    }

    /// Send a prebuilt inquiry document.
    pub async fn send(&self, document: &InquiryDocument) -> Result<Value> {
        self.inner.post("v2/inquiry", document).await
    }
}
