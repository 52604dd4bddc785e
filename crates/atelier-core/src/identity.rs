//! # Domain Identity Newtypes
//!
//! Newtype wrappers for all domain identifiers in the marketplace.
//! These prevent accidental identifier confusion — you cannot pass an
//! `OrderId` where a `DisputeId` is expected, and an order can never be
//! addressed by a party's id.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create from an existing UUID.
            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Access the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a purchase order.
    OrderId,
    "order"
);

uuid_id!(
    /// Unique identifier for a catalog item (a listed garment).
    ItemId,
    "item"
);

uuid_id!(
    /// Unique identifier for a dispute record.
    DisputeId,
    "dispute"
);

uuid_id!(
    /// Unique identifier for an escrow record.
    EscrowId,
    "escrow"
);

uuid_id!(
    /// Unique identifier for a notification record.
    NotificationId,
    "notification"
);

uuid_id!(
    /// Unique identifier for a marketplace party (customer, designer, admin).
    PartyId,
    "party"
);

/// Reference to a custodial wallet held by the escrow provider.
///
/// Opaque to this system; the payment network resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalletRef(pub String);

impl std::fmt::Display for WalletRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
