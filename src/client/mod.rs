//! HTTP client and request pipeline for the Billpay API.
//!
//! This module provides the main entry point [`BillpayClient`] for
//! interacting with the Billpay API.
//!
//! # Example
//!
//! ```no_run
//! use billpay_rs::{BillpayClient, ClientConfig, Credentials};
//!
//! # async fn example() -> billpay_rs::Result<()> {
//! let credentials = Credentials::new("client-id", "client-secret")?;
//! let client = BillpayClient::new(credentials, ClientConfig::default())?;
//!
//! let products = client.product_list().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;

pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_TOKEN_URL};
pub use http::BillpayClient;
pub(crate) use http::ClientInner;
