use std::sync::Arc;

use chrono::Utc;

use crate::domain::todo::models::PatchTodoCommand;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::WriteTodoCommand;
use crate::domain::user::models::UserId;
use crate::todo::errors::TodoError;
use crate::todo::ports::TodoRepository;

/// Domain service for owner-scoped to-do CRUD.
pub struct TodoService<TR>
where
    TR: TodoRepository,
{
    repository: Arc<TR>,
}

impl<TR> TodoService<TR>
where
    TR: TodoRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }

    pub async fn create(
        &self,
        owner: &UserId,
        command: WriteTodoCommand,
    ) -> Result<Todo, TodoError> {
        let now = Utc::now();

        let todo = Todo {
            id: TodoId::new(),
            user_id: *owner,
            title: command.title,
            description: command.description,
            completed: command.completed,
            created_at: now,
            updated_at: now,
        };

        self.repository.create(todo).await
    }

    pub async fn get(&self, id: &TodoId, owner: &UserId) -> Result<Todo, TodoError> {
        self.repository
            .find_by_id(id, owner)
            .await?
            .ok_or(TodoError::NotFound(id.to_string()))
    }

    pub async fn list(
        &self,
        owner: &UserId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Todo>, TodoError> {
        self.repository.list_for_user(owner, offset, limit).await
    }

    /// Full replacement: every writable field takes the command's value.
    pub async fn replace(
        &self,
        id: &TodoId,
        owner: &UserId,
        command: WriteTodoCommand,
    ) -> Result<Todo, TodoError> {
        let mut todo = self.get(id, owner).await?;

        todo.title = command.title;
        todo.description = command.description;
        todo.completed = command.completed;
        todo.updated_at = Utc::now();

        self.repository.update(todo).await
    }

    /// Partial update: unset fields keep their current value.
    pub async fn patch(
        &self,
        id: &TodoId,
        owner: &UserId,
        command: PatchTodoCommand,
    ) -> Result<Todo, TodoError> {
        let mut todo = self.get(id, owner).await?;

        if let Some(title) = command.title {
            todo.title = title;
        }
        if let Some(description) = command.description {
            todo.description = Some(description);
        }
        if let Some(completed) = command.completed {
            todo.completed = completed;
        }
        todo.updated_at = Utc::now();

        self.repository.update(todo).await
    }

    pub async fn delete(&self, id: &TodoId, owner: &UserId) -> Result<(), TodoError> {
        self.repository.delete(id, owner).await
    }
}
