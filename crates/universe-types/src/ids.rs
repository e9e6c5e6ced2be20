//! Type-safe identifier wrappers around `u64`.
//!
//! Entities in the simulation are keyed by strongly-typed IDs to prevent
//! accidental mixing of identifiers at compile time. IDs are sequential
//! integers allocated by the population manager: stable for the entity's
//! lifetime, never reused, and usable as ordered arena keys. Dead agents
//! keep their ID so they can be retained for final statistics.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around `u64` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw integer value as an identifier.
            ///
            /// The population manager is the only allocator of fresh IDs;
            /// this constructor exists for tests and snapshot restoration.
            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            /// Return the inner integer value.
            pub const fn into_inner(self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for an agent (mouse) in the simulation.
    ///
    /// Allocated sequentially starting at 0. Never reused, even after the
    /// agent dies.
    AgentId
}
