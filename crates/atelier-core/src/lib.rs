//! # atelier-core — Foundational Types for the Atelier Marketplace
//!
//! This crate is the bedrock of the Atelier workspace. It defines the
//! type-system primitives shared by every other crate: identifier newtypes,
//! validated monetary amounts, UTC-only timestamps, and the authenticated
//! actor identity that authorization checks run against.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `OrderId`, `ItemId`,
//!    `DisputeId`, `EscrowId`, `PartyId`, `WalletRef` — all newtypes.
//!    No bare strings or UUIDs for identifiers.
//!
//! 2. **No floats for money.** `Money` stores a validated decimal string
//!    and compares through minor-unit (cent) arithmetic. Floating-point
//!    amounts are unrepresentable by construction.
//!
//! 3. **UTC-only timestamps.** The `Timestamp` type enforces UTC with Z
//!    suffix and seconds precision.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `atelier-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement `Serialize`/`Deserialize`.

pub mod error;
pub mod identity;
pub mod money;
pub mod party;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::CoreError;
pub use identity::{DisputeId, EscrowId, ItemId, NotificationId, OrderId, PartyId, WalletRef};
pub use money::Money;
pub use party::{Actor, Role};
pub use temporal::Timestamp;
