//! # billpay-rs
//!
//! An async Rust client for the Billpay bill-payment and top-up aggregation
//! API.
//!
//! Every call authenticates with an OAuth2 `client_credentials` token and
//! speaks JSON:API. Order creation, the one state-changing call, is
//! additionally signed with RSA-PSS so the server can verify where the
//! request came from and that its body was not altered.
//!
//! ## Features
//!
//! - **Authentication**: OAuth2 client credentials, a fresh token per call
//! - **Signing**: RSA-PSS/SHA-256 with the maximum salt length for the key
//! - **Products**: list the product catalogue
//! - **Bills**: inquire what is owed before paying
//! - **Orders**: place orders and poll their status
//! - **Untyped responses**: server JSON is returned as [`serde_json::Value`]
//!   with key order and `null`s preserved
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use billpay_rs::{BillpayClient, ClientConfig, Credentials};
//! use billpay_rs::models::Fields;
//!
//! #[tokio::main]
//! async fn main() -> billpay_rs::Result<()> {
//!     let credentials = Credentials::new("client-id", "client-secret")?
//!         .with_private_key(std::fs::read_to_string("private_key.pem").unwrap());
//!     let client = BillpayClient::new(credentials, ClientConfig::default())?;
//!
//!     let products = client.product_list().await?;
//!     println!("{}", products);
//!
//!     let bill = client
//!         .inquiry("pdam-jabar-kota-cirebon", "0811111111", Fields::new())
//!         .await?;
//!     println!("{}", bill);
//!
//!     client
//!         .checkout("order123111", "pdam-jabar-kota-cirebon", "0811111111", 51750, Fields::new())
//!         .await?;
//!
//!     let status = client.check_status("order123111").await?;
//!     println!("{}", status["data"]["attributes"]["status"]);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use auth::{Credentials, Signer, TokenProvider};
pub use client::{BillpayClient, ClientConfig};
pub use error::{Error, Result};
pub use models::{ClientNumber, OrderId, ProductCode};

/// Prelude module for convenient imports.
///
/// ```rust
/// use billpay_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::auth::{AccessToken, Credentials, Signer, TokenProvider};
    pub use crate::client::{BillpayClient, ClientConfig};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        ClientNumber, Document, Fields, InquiryDocument, OrderDocument, OrderId, ProductCode,
        ResourceType,
    };
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_creation() {
        let id = OrderId::new("order123111");
        assert_eq!(id.as_str(), "order123111");
    }

    #[test]
    fn test_default_urls() {
        let config = ClientConfig::default();
        assert_eq!(config.token_url, client::DEFAULT_TOKEN_URL);
        assert!(config.base_url.ends_with('/'));
    }

    #[test]
    fn test_salt_len_derivation() {
        assert_eq!(auth::pss_salt_len(2048 / 8), Some(222));
        assert_eq!(auth::pss_salt_len(4096 / 8), Some(478));
    }
}
