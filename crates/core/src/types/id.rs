//! Product identifiers.
//!
//! The upstream catalog hands out numeric ids, but carts persisted by other
//! clients may carry them as strings. [`ProductId`] accepts either form and
//! compares by its canonical string so both spellings name the same product.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An opaque product identifier.
///
/// # Example
///
/// ```rust
/// # use fakestore_core::ProductId;
/// let from_number: ProductId = serde_json::from_str("7").unwrap();
/// let from_string: ProductId = serde_json::from_str("\"7\"").unwrap();
/// assert_eq!(from_number, from_string);
/// assert_eq!(from_number.as_str(), "7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the id as an integer when it is numeric.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl std::str::FromStr for ProductId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().to_owned()))
    }
}

// Numeric ids go back out as numbers so persisted carts keep the upstream shape.
impl Serialize for ProductId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_u64() {
            Some(n) if n.to_string() == self.0 => serializer.serialize_u64(n),
            _ => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Unsigned(u64),
            Signed(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Unsigned(n) => Self::from(n),
            Raw::Signed(n) => Self(n.to_string()),
            Raw::Text(s) => Self(s),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_number_and_string_are_equal() {
        let a: ProductId = serde_json::from_str("12").unwrap();
        let b: ProductId = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_numeric_id_serializes_as_number() {
        let id = ProductId::from(3);
        assert_eq!(serde_json::to_string(&id).unwrap(), "3");
    }

    #[test]
    fn test_opaque_id_serializes_as_string() {
        let id = ProductId::new("sku-77");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"sku-77\"");
        assert_eq!(id.as_u64(), None);
    }

    #[test]
    fn test_leading_zero_id_stays_a_string() {
        let id = ProductId::new("007");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"007\"");
    }

    #[test]
    fn test_from_str_trims() {
        let id: ProductId = " 5 ".parse().unwrap();
        assert_eq!(id.as_str(), "5");
    }
}
