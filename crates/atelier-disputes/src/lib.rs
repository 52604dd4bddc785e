//! # atelier-disputes
//!
//! Dispute records for contested orders. The order side of a dispute
//! (freezing the lifecycle, moving the escrow) lives in
//! `atelier-orders`; this crate keeps the record an admin reviews and
//! settles.

pub mod dispute;

pub use dispute::{Dispute, DisputeReason, DisputeStatus};
