use axum::extract::Path;
use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::create_todo::TodoRequest;
use super::get_todo::TodoData;
use super::ApiError;
use crate::domain::todo::models::PatchTodoCommand;
use crate::domain::todo::models::Title;
use crate::domain::todo::models::TodoId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::todo::errors::TodoError;

/// PUT: every writable field takes the request's value.
pub async fn full_update_todo(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(todo_id): Path<String>,
    Json(body): Json<TodoRequest>,
) -> Result<Json<TodoData>, ApiError> {
    let todo_id = TodoId::from_string(&todo_id).map_err(TodoError::from)?;

    state
        .todo_service
        .replace(&todo_id, &current.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| Json(todo.into()))
}

/// PATCH: absent fields keep their stored value.
pub async fn partial_update_todo(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(todo_id): Path<String>,
    Json(body): Json<PatchTodoRequest>,
) -> Result<Json<TodoData>, ApiError> {
    let todo_id = TodoId::from_string(&todo_id).map_err(TodoError::from)?;

    state
        .todo_service
        .patch(&todo_id, &current.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| Json(todo.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatchTodoRequest {
    title: Option<String>,
    description: Option<String>,
    completed: Option<bool>,
}

impl PatchTodoRequest {
    fn try_into_command(self) -> Result<PatchTodoCommand, TodoError> {
        Ok(PatchTodoCommand {
            title: self.title.map(Title::new).transpose()?,
            description: self.description,
            completed: self.completed,
        })
    }
}
