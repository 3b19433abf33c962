//! Strongly-typed ID wrappers for server-issued identifiers
//!
//! The server hands out opaque string ids. Wrapping them prevents
//! accidentally passing a transaction id where a category id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw server id
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Get the raw id string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().to_string()))
            }
        }
    };
}

define_id!(CategoryId);
define_id!(TransactionId);

/// Ids arrive as either JSON strings or numbers depending on the backend
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: From<String>,
    {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => T::from(s),
            RawId::Number(n) => T::from(n.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = CategoryId::new("c-42");
        assert_eq!(id.to_string(), "c-42");
        assert_eq!(id.as_str(), "c-42");
    }

    #[test]
    fn test_id_serialization_is_transparent() {
        let id = TransactionId::new("t1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"t1\"");
    }

    #[test]
    fn test_parse_trims() {
        let id: CategoryId = "  food ".parse().unwrap();
        assert_eq!(id, CategoryId::new("food"));
    }

    #[test]
    fn test_lenient_accepts_numbers() {
        #[derive(serde::Deserialize)]
        struct Holder {
            #[serde(deserialize_with = "lenient::deserialize")]
            id: CategoryId,
        }

        let holder: Holder = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(holder.id, CategoryId::new("7"));

        let holder: Holder = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(holder.id, CategoryId::new("abc"));
    }
}
