//! # Route Modules
//!
//! One module per API surface:
//!
//! - [`catalog`] — item listings (`/v1/items/*`)
//! - [`orders`] — order commands and projections (`/v1/orders/*`)
//! - [`disputes`] — dispute commands and the admin review surface
//! - [`notifications`] — per-party notification feeds

pub mod catalog;
pub mod disputes;
pub mod notifications;
pub mod orders;
