//! Newtype IDs for catalog, cart and account records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new random ID.
            pub fn generate() -> Self {
                Self(generate_id($prefix))
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId, "prod");
define_id!(LineItemId, "line");
define_id!(UserId, "user");

/// `<prefix>_<12 hex chars>`; short enough to type back into the CLI.
fn generate_id(prefix: &str) -> String {
    use rand::Rng;

    let bits: u64 = rand::thread_rng().gen::<u64>() & 0xffff_ffff_ffff;
    format!("{prefix}_{bits:012x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_carry_prefix() {
        let line = LineItemId::generate();
        assert!(line.as_str().starts_with("line_"));
        assert_eq!(line.as_str().len(), "line_".len() + 12);

        let user = UserId::generate();
        assert!(user.as_str().starts_with("user_"));
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(LineItemId::generate(), LineItemId::generate());
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ProductId::new("1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1\"");
    }

    #[test]
    fn test_id_from_str_and_display() {
        let id: ProductId = "shadow-pack-backpack".into();
        assert_eq!(format!("{id}"), "shadow-pack-backpack");
    }
}
