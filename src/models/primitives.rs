//! Primitive types and newtypes for type-safe API interactions.
//!
//! This module provides strongly-typed wrappers around string identifiers
//! so a product code cannot be passed where a customer number is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A caller-chosen order identifier.
///
/// # Example
///
/// ```
/// use billpay_rs::OrderId;
///
/// let id = OrderId::new("order123111");
/// assert_eq!(id.as_str(), "order123111");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Create a new order ID.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the order ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A biller product code (e.g., "pdam-jabar-kota-cirebon").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCode(String);

impl ProductCode {
    /// Create a new product code.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the product code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ProductCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for ProductCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The customer's number at the biller: a phone number, meter ID,
/// account number, and so on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientNumber(String);

impl ClientNumber {
    /// Create a new client number.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the client number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ClientNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for ClientNumber {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ClientNumber {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newtypes_serialize_transparently() {
        assert_eq!(
            serde_json::to_string(&OrderId::new("order1")).unwrap(),
            r#""order1""#
        );
        assert_eq!(
            serde_json::to_string(&ClientNumber::from("0811111111")).unwrap(),
            r#""0811111111""#
        );
        let code: ProductCode = serde_json::from_str(r#""pln-postpaid""#).unwrap();
        assert_eq!(code.as_str(), "pln-postpaid");
    }

    #[test]
    fn test_display() {
        assert_eq!(OrderId::new("abc").to_string(), "abc");
        assert_eq!(format!("{}", ProductCode::new("x")), "x");
    }
}
