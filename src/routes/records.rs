//! Fighter record read endpoint.

use crate::auth::AuthUser;
use crate::error::AppResult;
use crate::models::FighterRecord;
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;
use uuid::Uuid;

/// GET /fighters/:id/record
pub async fn get_fighter_record(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(fighter_id): Path<Uuid>,
) -> AppResult<Json<FighterRecord>> {
    let record = state.record_service.get_record(fighter_id).await?;
    Ok(Json(record))
}
