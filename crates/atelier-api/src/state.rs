//! # Application State & Configuration
//!
//! [`AppState`] is the cloneable handle handlers receive: the escrow
//! engine behind an `Arc`. [`AppState::new`] wires the notification
//! channel, log, and worker; the caller spawns the returned worker
//! future on its runtime.

use std::future::Future;
use std::sync::Arc;

use atelier_engine::EscrowEngine;
use atelier_notify::{NotificationEmitter, NotificationLog, NotificationWorker};

/// Environment-driven server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port to bind.
    pub port: u16,
}

impl AppConfig {
    /// Read configuration from the environment (`PORT`, default 8080).
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        Self { port }
    }
}

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The marketplace service layer.
    pub engine: Arc<EscrowEngine>,
}

impl AppState {
    /// Build the state and the notification worker future. The worker
    /// must be spawned for notifications to reach the per-party feed;
    /// commands succeed either way.
    pub fn new() -> (Self, impl Future<Output = ()> + Send) {
        let (emitter, rx) = NotificationEmitter::channel();
        let log = Arc::new(NotificationLog::new());
        let worker = NotificationWorker::new(Arc::clone(&log));
        let state = Self {
            engine: Arc::new(EscrowEngine::new(emitter, log)),
        };
        (state, worker.run(rx))
    }
}
