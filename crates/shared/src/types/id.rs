//! Typed IDs for entries, exclusions and the categories they reference.
//!
//! Wrapping every identifier keeps an `ExclusionId` from being passed where an
//! `EntryId` is expected, which matters in the fork workflow where both kinds
//! of id travel together.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a UUID-backed id newtype.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new time-ordered (UUID v7) id.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Wraps an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }

            /// Raw bytes, used when fingerprinting projection inputs.
            #[must_use]
            pub fn as_bytes(&self) -> &[u8; 16] {
                self.0.as_bytes()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s.trim())?))
            }
        }
    };
}

typed_id!(EntryId, "Unique identifier for an expense or income entry.");
typed_id!(ExclusionId, "Unique identifier for a per-month exclusion.");
typed_id!(
    CategoryId,
    "Weak reference to a category (expenses) or source (income) owned elsewhere."
);
