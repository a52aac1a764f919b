use axum::extract::Query;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::ApiError;
use crate::inbound::http::router::AppState;

/// Mint the short-lived exchange code the OAuth client trades in at the
/// token endpoint.
///
/// Unauthenticated: the GPT-action handoff this serves mints a code from a
/// bare user id. See DESIGN.md before changing that.
pub async fn temp_code(
    State(state): State<AppState>,
    Query(params): Query<TempCodeParams>,
) -> Result<Json<TempCodeResponseData>, ApiError> {
    let code = state.session_issuer.issue_exchange_code(params.user_id)?;

    Ok(Json(TempCodeResponseData { code }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct TempCodeParams {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TempCodeResponseData {
    pub code: String,
}
