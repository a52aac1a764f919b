use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use crate::domain::todo::models::TodoId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::todo::errors::TodoError;

pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(todo_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let todo_id = TodoId::from_string(&todo_id).map_err(TodoError::from)?;

    state
        .todo_service
        .delete(&todo_id, &current.user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}
