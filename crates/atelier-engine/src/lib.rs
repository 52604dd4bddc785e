//! # atelier-engine
//!
//! The service layer of the Atelier marketplace. [`EscrowEngine`] owns
//! the lock-guarded in-memory stores and the notification emitter, and
//! exposes every command and read projection the HTTP surface serves.
//! Each order command runs inside a single write-lock critical section
//! of the [`OrderStore`], so at most one transition per order is ever
//! in flight and everything a command changes commits together.

pub mod catalog;
pub mod engine;
pub mod store;

pub use catalog::Item;
pub use engine::EscrowEngine;
pub use store::{OrderStore, Store};
