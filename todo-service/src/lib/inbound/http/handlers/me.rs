use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde::Serialize;

use super::login::UserData;
use super::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Return the caller's user record.
///
/// Unlike the rest of the protected surface this re-resolves against the
/// store, so a deleted account fails here even while its token is valid.
pub async fn me(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> Result<Json<MeResponseData>, ApiError> {
    let user = state
        .user_service
        .get_user(&current.user_id)
        .await
        .map_err(|e| match e {
            UserError::NotFound(_) => {
                ApiError::Unauthorized("Could not validate credentials".to_string())
            }
            _ => ApiError::from(e),
        })?;

    Ok(Json(MeResponseData {
        user: (&user).into(),
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub user: UserData,
}
