//! # atelier-notify
//!
//! Fire-and-forget notifications. Commands emit [`NotificationEvent`]s
//! after their transition commits; a background [`NotificationWorker`]
//! drains the channel into a [`NotificationSink`]. Delivery can lag or
//! fail without ever affecting an order.

pub mod emitter;
pub mod event;
pub mod log;
pub mod worker;

pub use emitter::NotificationEmitter;
pub use event::{Notification, NotificationEvent};
pub use log::{NotificationLog, NotificationSink};
pub use worker::NotificationWorker;
