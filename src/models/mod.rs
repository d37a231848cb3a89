//! Data models for the Billpay API.
//!
//! - [`primitives`] - Identifier newtypes like `OrderId` and `ProductCode`
//! - [`document`] - JSON:API request documents for inquiry and checkout
//!
//! Responses are not modelled: every operation hands back the server's JSON
//! as a [`serde_json::Value`], with object keys in the order received.

pub mod document;
pub mod primitives;

pub use document::*;
pub use primitives::*;
