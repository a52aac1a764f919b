use axum::extract::Path;
use axum::extract::State;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::todo::errors::TodoError;

pub async fn get_todo(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(todo_id): Path<String>,
) -> Result<Json<TodoData>, ApiError> {
    let todo_id = TodoId::from_string(&todo_id).map_err(TodoError::from)?;

    state
        .todo_service
        .get(&todo_id, &current.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| Json(todo.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoData {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Todo> for TodoData {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            user_id: todo.user_id.to_string(),
            title: todo.title.as_str().to_string(),
            description: todo.description.clone(),
            completed: todo.completed,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}
