//! Offer negotiation endpoints: send pair, respond.

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::{Offer, OfferStatus};
use crate::services::SendOffersInput;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct SendOffersBody {
    pub fight_id: Uuid,
    pub event_id: Uuid,
    pub event_slot_id: Uuid,
    pub fighter_a_amount: Decimal,
    pub fighter_a_currency: String,
    pub fighter_b_amount: Decimal,
    pub fighter_b_currency: String,
}

#[derive(Debug, Serialize)]
pub struct OfferPair {
    pub offers: Vec<Offer>,
}

#[derive(Debug, Deserialize)]
pub struct RespondBody {
    pub status: String,
}

/// POST /offers
pub async fn send_offers(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<SendOffersBody>,
) -> AppResult<(StatusCode, Json<OfferPair>)> {
    let input = SendOffersInput {
        fight_id: body.fight_id,
        event_id: body.event_id,
        event_slot_id: body.event_slot_id,
        amount_a: body.fighter_a_amount,
        currency_a: body.fighter_a_currency,
        amount_b: body.fighter_b_amount,
        currency_b: body.fighter_b_currency,
    };
    let (offer_a, offer_b) = state.offer_service.send_offers(auth.id, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(OfferPair {
            offers: vec![offer_a, offer_b],
        }),
    ))
}

/// PUT /offers/:id/status
pub async fn respond_to_offer(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(offer_id): Path<Uuid>,
    Json(body): Json<RespondBody>,
) -> AppResult<Json<Offer>> {
    let status = OfferStatus::from_str(&body.status).map_err(AppError::Validation)?;
    let offer = state.offer_service.respond(auth.id, offer_id, status).await?;
    Ok(Json(offer))
}
