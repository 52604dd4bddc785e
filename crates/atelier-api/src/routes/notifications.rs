//! # Notification Routes
//!
//! ## Endpoints
//!
//! - `GET /v1/notifications/:party_id` — a party's delivered feed

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use atelier_core::PartyId;

use crate::error::AppError;
use crate::extractors::AuthenticatedActor;
use crate::responses::NotificationBody;
use crate::state::AppState;

/// Build the notifications router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/notifications/:party_id", get(list_notifications))
}

/// GET /v1/notifications/:party_id — A party's notification feed.
///
/// Parties read their own feed; admins can read anyone's.
#[utoipa::path(
    get,
    path = "/v1/notifications/{party_id}",
    params(("party_id" = Uuid, Path, description = "Recipient party id")),
    responses(
        (status = 200, description = "Delivered notifications, oldest first", body = Vec<NotificationBody>),
        (status = 403, description = "Caller may not read this feed", body = crate::error::ErrorBody),
    ),
    tag = "notifications"
)]
async fn list_notifications(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(party_id): Path<Uuid>,
) -> Result<Json<Vec<NotificationBody>>, AppError> {
    let party = PartyId::from_uuid(party_id);
    if actor.id != party && !actor.is_admin() {
        return Err(AppError::Forbidden(
            "parties may only read their own notification feed".to_string(),
        ));
    }
    Ok(Json(
        state
            .engine
            .notifications_for(party)
            .into_iter()
            .map(Into::into)
            .collect(),
    ))
}
