//! API service modules for Billpay endpoints.
//!
//! Each service provides methods for interacting with a specific
//! subset of the Billpay API. All of them return the server's JSON
//! untouched as a [`serde_json::Value`].

mod bills;
mod orders;
mod products;

pub use bills::BillsService;
pub use orders::OrdersService;
pub use products::ProductsService;
