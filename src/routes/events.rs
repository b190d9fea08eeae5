//! Event lifecycle endpoints: create draft, publish.

use crate::auth::AuthUser;
use crate::error::AppResult;
use crate::models::{Event, EventSlot};
use crate::services::CreateEventInput;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateSlotBody {
    pub start_time: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct CreateEventBody {
    pub name: String,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub venue_capacity: Option<i32>,
    pub poster_image: Option<String>,
    pub ticket_link: Option<String>,
    #[serde(default)]
    pub slots: Vec<CreateSlotBody>,
}

#[derive(Debug, Serialize)]
pub struct CreatedEvent {
    pub event: Event,
    pub slots: Vec<EventSlot>,
}

/// POST /events
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<CreateEventBody>,
) -> AppResult<(StatusCode, Json<CreatedEvent>)> {
    let input = CreateEventInput {
        name: body.name,
        venue_name: body.venue_name,
        venue_address: body.venue_address,
        city: body.city,
        country: body.country,
        venue_capacity: body.venue_capacity,
        poster_image: body.poster_image,
        ticket_link: body.ticket_link,
        slot_times: body.slots.iter().map(|s| s.start_time).collect(),
    };
    let (event, slots) = state.event_service.create_event(auth.id, input).await?;
    Ok((StatusCode::CREATED, Json(CreatedEvent { event, slots })))
}

/// PUT /events/:id/publish
pub async fn publish_event(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(event_id): Path<Uuid>,
) -> AppResult<Json<Event>> {
    let event = state.event_service.publish_event(event_id, auth.id).await?;
    Ok(Json(event))
}
