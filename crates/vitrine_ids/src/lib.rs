//! Shared identifier wrappers for Vitrine.
//!
//! Content-API identifiers are opaque strings (`white_gold`, `blt4f2c...`).
//! Parsing through `FromStr` validates them; deserialization is lenient so a
//! malformed record never aborts a catalog load. An empty identifier read
//! from JSON simply matches nothing.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Error returned when parsing a string-backed identifier fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdParseError {
    message: String,
}

impl IdParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for IdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for IdParseError {}

fn validate(value: &str, label: &str) -> Result<(), IdParseError> {
    if value.is_empty() {
        return Err(IdParseError::new(format!("Invalid {}: empty", label)));
    }
    if value.trim() != value {
        return Err(IdParseError::new(format!(
            "Invalid {} '{}': surrounding whitespace",
            label, value
        )));
    }
    Ok(())
}

macro_rules! define_string_id {
    ($name:ident, $label:expr) => {
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn parse(value: &str) -> Result<Self, IdParseError> {
                validate(value, $label)?;
                Ok(Self(value.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Empty identifiers only arise from lenient deserialization.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(ItemUid, "item UID");
define_string_id!(CategoryKey, "category key");
define_string_id!(TermUid, "term UID");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_plain_keys() {
        let key: CategoryKey = "product_type".parse().unwrap();
        assert_eq!(key.as_str(), "product_type");
        assert_eq!(key.to_string(), "product_type");
    }

    #[test]
    fn test_parse_rejects_empty_and_padded() {
        assert!(TermUid::parse("").is_err());
        let err = TermUid::parse(" gold").unwrap_err();
        assert!(err.to_string().contains("term UID"));
    }

    #[test]
    fn test_deserialize_is_lenient() {
        let uid: ItemUid = serde_json::from_str("\"\"").unwrap();
        assert!(uid.is_empty());
    }

    #[test]
    fn test_borrow_allows_str_lookup() {
        let mut set = std::collections::BTreeSet::new();
        set.insert(TermUid::parse("ring").unwrap());
        assert!(set.contains("ring"));
    }
}
