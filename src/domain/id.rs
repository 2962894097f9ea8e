//! Identifier newtypes shared by the stored records
//!
//! Identifiers are generated as UUID v4 strings, but any externally supplied
//! value that is alphanumeric with inner hyphens (max 64 chars) is accepted.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::DomainError;

/// Maximum accepted identifier length
pub const MAX_ID_LENGTH: usize = 64;

static ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9-]*[a-zA-Z0-9]$|^[a-zA-Z0-9]$").unwrap());

/// Validate an identifier string
pub fn validate_id(kind: &str, id: &str) -> Result<(), DomainError> {
    if id.is_empty() {
        return Err(DomainError::validation(format!("{} ID cannot be empty", kind)));
    }

    if id.len() > MAX_ID_LENGTH {
        return Err(DomainError::validation(format!(
            "{} ID too long: {} characters (max {})",
            kind,
            id.len(),
            MAX_ID_LENGTH
        )));
    }

    if !ID_PATTERN.is_match(id) {
        return Err(DomainError::validation(format!(
            "Invalid {} ID format '{}': must be alphanumeric with hyphens",
            kind.to_lowercase(),
            id
        )));
    }

    Ok(())
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create an identifier after validation
            pub fn new(id: impl Into<String>) -> Result<Self, $crate::domain::DomainError> {
                let id = id.into();
                $crate::domain::id::validate_id($kind, &id)?;
                Ok(Self(id))
            }

            /// Generate a fresh random identifier
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::domain::DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl $crate::domain::storage::StorageKey for $name {
            fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}

pub(crate) use define_id;
