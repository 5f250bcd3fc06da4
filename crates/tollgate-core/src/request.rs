//! The request record flowing through both chains.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// An immutable mapping from field name to string value.
///
/// A `Request` is assembled once, before any chain runs, and is only ever
/// read by steps. There are no mutating methods; [`Request::with_field`]
/// consumes the value and is meant for construction.
///
/// # Example
///
/// ```
/// use tollgate_core::Request;
///
/// let request = Request::new()
///     .with_field("name", "John")
///     .with_field("age", "25");
///
/// assert_eq!(request.get("name"), Some("John"));
/// assert_eq!(request.get("payment"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Request {
    fields: BTreeMap<String, String>,
}

impl Request {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the reference record used by the `tollgate` binary when no
    /// configuration overrides it.
    #[must_use]
    pub fn sample() -> Self {
        Self::new()
            .with_field("name", "John")
            .with_field("country", "Poland")
            .with_field("age", "25")
            .with_field("payment", "QIWI")
    }

    /// Returns the request with `field` set to `value`.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Returns the value of a field, if present.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Returns true if the field is present.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns true if the field is present and equal to `expected`.
    #[must_use]
    pub fn field_equals(&self, field: &str, expected: &str) -> bool {
        self.get(field) == Some(expected)
    }

    /// Iterates over all fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the request has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Request
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<BTreeMap<String, String>> for Request {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (field, value)) in self.fields().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {value:?}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_request() {
        let request = Request::sample();
        assert_eq!(request.get("name"), Some("John"));
        assert_eq!(request.get("country"), Some("Poland"));
        assert_eq!(request.get("age"), Some("25"));
        assert_eq!(request.get("payment"), Some("QIWI"));
        assert_eq!(request.len(), 4);
    }

    #[test]
    fn test_missing_field() {
        let request = Request::new();
        assert!(request.is_empty());
        assert_eq!(request.get("age"), None);
        assert!(!request.contains("age"));
        assert!(!request.field_equals("age", ""));
    }

    #[test]
    fn test_field_equals_is_case_sensitive() {
        let request = Request::new().with_field("country", "Poland");
        assert!(request.field_equals("country", "Poland"));
        assert!(!request.field_equals("country", "poland"));
    }

    #[test]
    fn test_from_iterator() {
        let request: Request = [("name", "John"), ("age", "30")].into_iter().collect();
        assert_eq!(request.get("age"), Some("30"));
    }

    #[test]
    fn test_deserialize_transparent_map() {
        let request: Request =
            serde_json::from_str(r#"{"name":"John","payment":"Sberbank"}"#).expect("valid json");
        assert_eq!(request.get("payment"), Some("Sberbank"));
        assert_eq!(request.len(), 2);
    }

    #[test]
    fn test_display() {
        let request = Request::new().with_field("age", "25").with_field("name", "John");
        assert_eq!(request.to_string(), r#"{age: "25", name: "John"}"#);
    }
}
