use auth::GrantRequest;
use axum::extract::State;
use axum::Form;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::FieldError;
use crate::inbound::http::router::AppState;

/// OAuth token endpoint: one call runs a single grant exchange.
///
/// The presence of `grant_type` is a schema concern (422); everything past
/// that is the grant flow's single 401 failure shape.
pub async fn token(
    State(state): State<AppState>,
    Form(form): Form<TokenRequestForm>,
) -> Result<Json<TokenResponseData>, ApiError> {
    let grant_type = form
        .grant_type
        .ok_or_else(|| ApiError::Validation(vec![FieldError::missing("grant_type")]))?;

    let request = GrantRequest::parse(&grant_type, form.code, form.refresh_token)?;

    let session = state.grant_flow.exchange(request)?;

    Ok(Json(TokenResponseData {
        access_token: session.access_token,
        token_type: "bearer",
        expires_in: session.expires_in,
        refresh_token: session.refresh_token,
    }))
}

/// Form-encoded token-endpoint request.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequestForm {
    grant_type: Option<String>,
    code: Option<String>,
    refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub refresh_token: String,
}
