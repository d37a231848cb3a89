//! JSON:API request documents.
//!
//! Requests are wrapped in a `{"data": {...}}` envelope. The key order of
//! each document is fixed by its struct definition, and the serialized bytes
//! are what both the HTTP body and the request signature cover:
//!
//! ```text
//! inquiry: {"data":{"id":..,"type":"inquiry","attributes":{"product_code",..,"client_number",..,"fields",..}}}
//! order:   {"data":{"type":"order","id":..,"attributes":{"product_code",..,"client_number",..,"amount",..,"fields",..}}}
//! ```

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::primitives::{ClientNumber, OrderId, ProductCode};
use crate::Result;

/// Extra biller-specific input fields.
///
/// An ordered string-keyed map of JSON values. An empty set of fields
/// serializes as `[]`, a non-empty one as a JSON object.
///
/// # Example
///
/// ```
/// use billpay_rs::models::Fields;
///
/// assert_eq!(serde_json::to_string(&Fields::new()).unwrap(), "[]");
///
/// let fields = Fields::new().with("month", 3).with("year", "2024");
/// assert_eq!(serde_json::to_string(&fields).unwrap(), r#"{"month":3,"year":"2024"}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Map<String, Value>);

impl Fields {
    /// Create an empty set of fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, returning `self` for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a field, returning the previous value if one was set.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no fields are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<Map<String, Value>> for Fields {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.0.is_empty() {
            serializer.serialize_seq(Some(0))?.end()
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Fields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = Fields;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of fields or an empty array")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Fields, A::Error> {
                if seq.next_element::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::custom("fields array must be empty"));
                }
                Ok(Fields::new())
            }

            fn visit_map<A: de::MapAccess<'de>>(self, map: A) -> std::result::Result<Fields, A::Error> {
                Map::deserialize(de::value::MapAccessDeserializer::new(map)).map(Fields)
            }
        }

        deserializer.deserialize_any(FieldsVisitor)
    }
}

/// The JSON:API resource type of a request document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// Bill inquiry
    Inquiry,
    /// Order (checkout)
    Order,
}

/// A JSON:API request envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<R> {
    /// The primary resource
    pub data: R,
}

impl<R: Serialize> Document<R> {
    /// Serialize to compact JSON.
    ///
    /// These bytes are sent as the request body and, for signed requests,
    /// are exactly what the signature covers.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Resource object of an inquiry request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InquiryResource {
    /// Resource id; the client number being inquired
    pub id: ClientNumber,
    /// Always [`ResourceType::Inquiry`]
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    /// Inquiry attributes
    pub attributes: InquiryAttributes,
}

/// Attributes of an inquiry request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InquiryAttributes {
    /// Product to inquire
    pub product_code: ProductCode,
    /// Customer number at the biller
    pub client_number: ClientNumber,
    /// Extra biller-specific fields
    pub fields: Fields,
}

/// Resource object of an order request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResource {
    /// Always [`ResourceType::Order`]
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    /// Caller-chosen order id
    pub id: OrderId,
    /// Order attributes
    pub attributes: OrderAttributes,
}

/// Attributes of an order request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAttributes {
    /// Product to purchase
    pub product_code: ProductCode,
    /// Customer number at the biller
    pub client_number: ClientNumber,
    /// Amount in the smallest currency unit; 0 lets the biller decide
    pub amount: u64,
    /// Extra biller-specific fields
    pub fields: Fields,
}

/// Request body of `POST v2/inquiry`.
pub type InquiryDocument = Document<InquiryResource>;

/// Request body of `POST v2/order`.
pub type OrderDocument = Document<OrderResource>;

impl Document<InquiryResource> {
    /// Build an inquiry document.
    pub fn inquiry(
        product_code: impl Into<ProductCode>,
        client_number: impl Into<ClientNumber>,
        fields: Fields,
    ) -> Self {
        let client_number = client_number.into();
        Document {
            data: InquiryResource {
                id: client_number.clone(),
                resource_type: ResourceType::Inquiry,
                attributes: InquiryAttributes {
                    product_code: product_code.into(),
                    client_number,
                    fields,
                },
            },
        }
    }
}

impl Document<OrderResource> {
    /// Build an order (checkout) document.
    pub fn order(
        id: impl Into<OrderId>,
        product_code: impl Into<ProductCode>,
        client_number: impl Into<ClientNumber>,
        amount: u64,
        fields: Fields,
    ) -> Self {
        Document {
            data: OrderResource {
                resource_type: ResourceType::Order,
                id: id.into(),
                attributes: OrderAttributes {
                    product_code: product_code.into(),
                    client_number: client_number.into(),
                    amount,
                    fields,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inquiry_document_bytes() {
        let doc = InquiryDocument::inquiry("pdam-jabar-kota-cirebon", "0811111111", Fields::new());
        assert_eq!(
            String::from_utf8(doc.to_bytes().unwrap()).unwrap(),
            r#"{"data":{"id":"0811111111","type":"inquiry","attributes":{"product_code":"pdam-jabar-kota-cirebon","client_number":"0811111111","fields":[]}}}"#
        );
    }

    #[test]
    fn test_order_document_bytes() {
        let doc = OrderDocument::order(
            "order123111",
            "pdam-jabar-kota-cirebon",
            "0811111111",
            51750,
            Fields::new(),
        );
        assert_eq!(
            String::from_utf8(doc.to_bytes().unwrap()).unwrap(),
            r#"{"data":{"type":"order","id":"order123111","attributes":{"product_code":"pdam-jabar-kota-cirebon","client_number":"0811111111","amount":51750,"fields":[]}}}"#
        );
    }

    #[test]
    fn test_order_document_with_fields() {
        let fields = Fields::new().with("period", "202401").with("customer_name", "Budi");
        let doc = OrderDocument::order("o1", "pln-postpaid", "5300000001", 0, fields);
        assert_eq!(
            String::from_utf8(doc.to_bytes().unwrap()).unwrap(),
            r#"{"data":{"type":"order","id":"o1","attributes":{"product_code":"pln-postpaid","client_number":"5300000001","amount":0,"fields":{"period":"202401","customer_name":"Budi"}}}}"#
        );
    }

    #[test]
    fn test_fields_deserialize_from_array_or_object() {
        let empty: Fields = serde_json::from_str("[]").unwrap();
        assert!(empty.is_empty());

        let fields: Fields = serde_json::from_str(r#"{"b":1,"a":"x"}"#).unwrap();
        let names: Vec<&String> = fields.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(fields.get("b"), Some(&Value::from(1)));

        assert!(serde_json::from_str::<Fields>(r#"["x"]"#).is_err());
        assert!(serde_json::from_str::<Fields>("42").is_err());
    }

    #[test]
    fn test_fields_from_iterator() {
        let fields: Fields = vec![("meter", "123"), ("zone", "4")].into_iter().collect();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("zone"), Some(&Value::from("4")));
    }

    #[test]
    fn test_document_deserializes_back() {
        let doc = OrderDocument::order("o1", "p", "c", 10, Fields::new().with("k", true));
        let parsed: OrderDocument = serde_json::from_slice(&doc.to_bytes().unwrap()).unwrap();
        assert_eq!(parsed, doc);
    }
}
