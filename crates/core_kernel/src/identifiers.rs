//! Strongly-typed identifiers for marketplace records
//!
//! Catalog and policy records arrive with human-readable string ids
//! (`ins-001`, `pol-002`), so identifiers wrap a `String` rather than a raw
//! UUID. Newtypes still prevent passing a policy id where a product id is
//! expected. Freshly generated ids use the type prefix plus a UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Errors produced when parsing identifiers
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Identifier cannot be empty")]
    Empty,

    #[error("Identifier contains whitespace: {0:?}")]
    Whitespace(String),
}

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier value
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Generates a new random identifier
            pub fn generate() -> Self {
                Self(format!("{}-{}", $prefix, Uuid::new_v4().simple()))
            }

            /// Generates a new time-ordered identifier (v7)
            pub fn generate_v7() -> Self {
                Self(format!("{}-{}", $prefix, Uuid::now_v7().simple()))
            }

            /// Returns the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the prefix used for generated identifiers
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.is_empty() {
                    return Err(IdentifierError::Empty);
                }
                if s.chars().any(char::is_whitespace) {
                    return Err(IdentifierError::Whitespace(s.to_string()));
                }
                Ok(Self(s.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(InsuranceId, "ins");
define_id!(PolicyId, "pol");
define_id!(UserId, "user");
define_id!(OrderId, "ord");
