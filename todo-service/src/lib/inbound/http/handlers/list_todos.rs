use axum::extract::Query;
use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::get_todo::TodoData;
use super::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

const MAX_PER_PAGE: i64 = 100;

pub async fn list_todos(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Query(params): Query<ListTodosParams>,
) -> Result<Json<PaginatedTodos>, ApiError> {
    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(10);

    if page < 1 {
        return Err(ApiError::UnprocessableEntity(
            "page must be at least 1".to_string(),
        ));
    }
    if !(1..=MAX_PER_PAGE).contains(&per_page) {
        return Err(ApiError::UnprocessableEntity(format!(
            "per_page must be between 1 and {MAX_PER_PAGE}"
        )));
    }

    let offset = (page - 1) * per_page;
    let todos = state
        .todo_service
        .list(&current.user_id, offset, per_page)
        .await
        .map_err(ApiError::from)?;

    // A full page suggests more items; the links are relative query strings
    // the client appends to the collection URL.
    let next = (todos.len() as i64 == per_page)
        .then(|| format!("?page={}&per_page={}", page + 1, per_page));
    let previous = (page > 1).then(|| format!("?page={}&per_page={}", page - 1, per_page));

    Ok(Json(PaginatedTodos {
        count: todos.len(),
        next,
        previous,
        todos: todos.iter().map(TodoData::from).collect(),
    }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListTodosParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginatedTodos {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub todos: Vec<TodoData>,
}
