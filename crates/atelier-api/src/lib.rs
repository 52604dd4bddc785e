//! # atelier-api — Axum HTTP Surface
//!
//! Party commands and admin read projections for the Atelier
//! marketplace, over the engine in `atelier-engine`.
//!
//! ## API Surface
//!
//! | Prefix                  | Module                     | Domain                |
//! |-------------------------|----------------------------|-----------------------|
//! | `/v1/items/*`           | [`routes::catalog`]        | Item listings         |
//! | `/v1/orders/*`          | [`routes::orders`]         | Order lifecycle       |
//! | `/v1/orders/:id/dispute`| [`routes::disputes`]       | Dispute commands      |
//! | `/v1/disputes/*`        | [`routes::disputes`]       | Admin review surface  |
//! | `/v1/notifications/*`   | [`routes::notifications`]  | Party feeds           |
//!
//! Identity rides on the `X-Actor-Id` / `X-Actor-Role` headers, parsed
//! by [`extractors::AuthenticatedActor`]. Health probes are mounted
//! outside the identified surface.

pub mod error;
pub mod extractors;
pub mod openapi;
pub mod responses;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::catalog::router())
        .merge(routes::orders::router())
        .merge(routes::disputes::router())
        .merge(routes::notifications::router())
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Unauthenticated health probes.
    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe, 200 whenever the process runs.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe, 200 when the application can serve.
async fn readiness() -> &'static str {
    "ready"
}
