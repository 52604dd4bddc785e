//! # Lock-Guarded In-Memory Stores
//!
//! `Store` keeps records behind a single `parking_lot::RwLock`.
//! [`Store::try_update`] runs a fallible closure against a clone of the
//! record inside one write-lock critical section and commits the clone
//! only on success, so a failed command leaves the stored record
//! untouched and at most one update per record is ever in flight.
//!
//! [`OrderStore`] adds the versioned put for read-copy-write callers:
//! a stale version stamp fails with `ConcurrentModification` and only
//! the read phase needs retrying.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use parking_lot::RwLock;

use atelier_core::OrderId;
use atelier_orders::{Order, OrderError};

/// A keyed in-memory record store.
#[derive(Debug)]
pub struct Store<K, V> {
    entity: &'static str,
    records: RwLock<HashMap<K, V>>,
}

impl<K, V> Store<K, V>
where
    K: Copy + Eq + Hash + Display,
    V: Clone,
{
    /// Create an empty store. `entity` names the record kind in
    /// `NotFound` errors.
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace a record.
    pub fn insert(&self, key: K, value: V) {
        self.records.write().insert(key, value);
    }

    /// Fetch a record by key.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] if the key has no record.
    pub fn get(&self, key: K) -> Result<V, OrderError> {
        self.records
            .read()
            .get(&key)
            .cloned()
            .ok_or(OrderError::NotFound {
                entity: self.entity,
                id: key.to_string(),
            })
    }

    /// Fetch a record by key, `None` if absent.
    pub fn find(&self, key: K) -> Option<V> {
        self.records.read().get(&key).cloned()
    }

    /// Snapshot of every record.
    pub fn list(&self) -> Vec<V> {
        self.records.read().values().cloned().collect()
    }

    /// Apply a fallible update to one record inside a single write-lock
    /// critical section. The closure runs against a clone; the clone is
    /// committed only if it returns `Ok`, so failures leave the stored
    /// record exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] if the key has no record, or
    /// whatever the closure returns.
    pub fn try_update<R>(
        &self,
        key: K,
        f: impl FnOnce(&mut V) -> Result<R, OrderError>,
    ) -> Result<R, OrderError> {
        let mut records = self.records.write();
        let stored = records.get_mut(&key).ok_or(OrderError::NotFound {
            entity: self.entity,
            id: key.to_string(),
        })?;
        let mut working = stored.clone();
        let result = f(&mut working)?;
        *stored = working;
        Ok(result)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

/// The order store: a [`Store`] plus optimistic-concurrency writes.
#[derive(Debug)]
pub struct OrderStore {
    inner: Store<OrderId, Order>,
}

impl OrderStore {
    /// Create an empty order store.
    pub fn new() -> Self {
        Self {
            inner: Store::new("order"),
        }
    }

    /// Insert a freshly placed order.
    pub fn insert(&self, order: Order) {
        self.inner.insert(order.id, order);
    }

    /// Fetch an order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] if no order has the id.
    pub fn get(&self, id: OrderId) -> Result<Order, OrderError> {
        self.inner.get(id)
    }

    /// Snapshot of every order.
    pub fn list(&self) -> Vec<Order> {
        self.inner.list()
    }

    /// Run an order command inside one write-lock critical section.
    /// The state change, escrow movement, review, and version bump the
    /// command makes commit together or not at all.
    ///
    /// Returns the committed order.
    pub fn transition(
        &self,
        id: OrderId,
        f: impl FnOnce(&mut Order) -> Result<(), OrderError>,
    ) -> Result<Order, OrderError> {
        self.inner.try_update(id, |order| {
            f(order)?;
            Ok(order.clone())
        })
    }

    /// Replace an order read at `expected` version with a locally
    /// modified copy.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::ConcurrentModification`] if another writer
    /// committed since the read; the caller should re-read and retry.
    pub fn put_versioned(&self, order: Order, expected: u64) -> Result<(), OrderError> {
        let mut records = self.inner.records.write();
        let stored = records.get_mut(&order.id).ok_or(OrderError::NotFound {
            entity: "order",
            id: order.id.to_string(),
        })?;
        if stored.version != expected {
            return Err(OrderError::ConcurrentModification {
                order_id: order.id.to_string(),
                expected,
                actual: stored.version,
            });
        }
        *stored = order;
        Ok(())
    }
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new()
    }
}
