use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::get_todo::TodoData;
use super::ApiError;
use crate::domain::todo::models::Title;
use crate::domain::todo::models::WriteTodoCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::todo::errors::TodoError;

pub async fn create_todo(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(body): Json<TodoRequest>,
) -> Result<(StatusCode, Json<TodoData>), ApiError> {
    state
        .todo_service
        .create(&current.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| (StatusCode::CREATED, Json(todo.into())))
}

/// HTTP request body carrying an item's full writable state; shared by
/// create and full update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TodoRequest {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    completed: bool,
}

impl TodoRequest {
    pub(super) fn try_into_command(self) -> Result<WriteTodoCommand, TodoError> {
        Ok(WriteTodoCommand {
            title: Title::new(self.title)?,
            description: self.description,
            completed: self.completed,
        })
    }
}
