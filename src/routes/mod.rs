//! HTTP route modules for the scheduling core:
//!
//! - `fights` — matchmaking request/accept/reject plus result recording.
//! - `events` — draft creation and the publish gate.
//! - `offers` — the two-sided offer protocol.
//! - `records` — derived fighter record reads.

pub mod events;
pub mod fights;
pub mod offers;
pub mod records;

use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/fights/request", post(fights::request_fight))
        .route("/fights/:id/accept", put(fights::accept_fight))
        .route("/fights/:id/reject", put(fights::reject_fight))
        .route("/fights/:id/result", post(fights::record_result))
        .route("/events", post(events::create_event))
        .route("/events/:id/publish", put(events::publish_event))
        .route("/offers", post(offers::send_offers))
        .route("/offers/:id/status", put(offers::respond_to_offer))
        .route("/fighters/:id/record", get(records::get_fighter_record))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe; verifies the database is reachable.
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, &'static str) {
    match sqlx::query("SELECT 1").execute(state.database.pool()).await {
        Ok(_) => (StatusCode::OK, "ok"),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "database unreachable"),
    }
}
