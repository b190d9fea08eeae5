//! Fight lifecycle endpoints: request, accept, reject, record result.

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::{Fight, FightResult, ResultType};
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct RequestFightBody {
    pub opponent_id: Uuid,
}

#[derive(Debug, Deserialize, Default)]
pub struct RejectFightBody {
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecordResultBody {
    pub winner_id: Option<Uuid>,
    pub result_type: String,
}

/// POST /fights/request
pub async fn request_fight(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<RequestFightBody>,
) -> AppResult<(StatusCode, Json<Fight>)> {
    let fight = state
        .fight_service
        .send_request(auth.id, body.opponent_id)
        .await?;
    Ok((StatusCode::CREATED, Json(fight)))
}

/// PUT /fights/:id/accept
pub async fn accept_fight(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(fight_id): Path<Uuid>,
) -> AppResult<Json<Fight>> {
    let fight = state.fight_service.accept_fight(fight_id, auth.id).await?;
    Ok(Json(fight))
}

/// PUT /fights/:id/reject
pub async fn reject_fight(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(fight_id): Path<Uuid>,
    body: Option<Json<RejectFightBody>>,
) -> AppResult<Json<Fight>> {
    let reason = body.as_ref().and_then(|b| b.reason.as_deref());
    let fight = state
        .fight_service
        .reject_fight(fight_id, auth.id, reason)
        .await?;
    Ok(Json(fight))
}

/// POST /fights/:id/result
pub async fn record_result(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(fight_id): Path<Uuid>,
    Json(body): Json<RecordResultBody>,
) -> AppResult<(StatusCode, Json<FightResult>)> {
    let result_type = ResultType::from_str(&body.result_type).map_err(AppError::Validation)?;
    let result = state
        .record_service
        .record_result(auth.id, fight_id, body.winner_id, result_type)
        .await?;
    Ok((StatusCode::CREATED, Json(result)))
}
