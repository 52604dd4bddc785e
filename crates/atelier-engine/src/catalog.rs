//! # Item Catalog
//!
//! Listed garments. An order is placed against an available item; the
//! designer (or an admin) can delist an item, which blocks new orders
//! but never touches orders already placed.

use serde::{Deserialize, Serialize};

use atelier_core::{ItemId, Money, PartyId, Timestamp};
use atelier_orders::OrderError;

/// A garment listed for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier.
    pub id: ItemId,
    /// The designer who listed it.
    pub designer: PartyId,
    /// Display name.
    pub name: String,
    /// Listing description.
    pub description: String,
    /// Listed price. Fixed per order at placement.
    pub price: Money,
    /// Whether new orders may be placed against it.
    pub available: bool,
    /// When the item was listed.
    pub created_at: Timestamp,
    /// When the item last changed.
    pub updated_at: Timestamp,
}

impl Item {
    /// List a new item.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Validation`] if the name is blank or the
    /// price is not strictly positive.
    pub fn new(
        designer: PartyId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
    ) -> Result<Self, OrderError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(OrderError::validation("item name must not be empty"));
        }
        if !price.is_positive() {
            return Err(OrderError::validation(format!(
                "item price must be positive, got {price}"
            )));
        }
        let now = Timestamp::now();
        Ok(Self {
            id: ItemId::new(),
            designer,
            name,
            description: description.into(),
            price,
            available: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Take the item off the catalog. Idempotent.
    pub fn delist(&mut self) {
        if self.available {
            self.available = false;
            self.updated_at = Timestamp::now();
        }
    }
}
