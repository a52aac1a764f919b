use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::todo::models::Title;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::user::models::UserId;
use crate::todo::errors::TodoError;
use crate::todo::ports::TodoRepository;

pub struct PostgresTodoRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct TodoRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    description: Option<String>,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TodoRow {
    fn try_into_todo(self) -> Result<Todo, TodoError> {
        Ok(Todo {
            id: TodoId(self.id),
            user_id: UserId(self.user_id),
            title: Title::new(self.title)?,
            description: self.description,
            completed: self.completed,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn create(&self, todo: Todo) -> Result<Todo, TodoError> {
        sqlx::query(
            r#"
            INSERT INTO todos (id, user_id, title, description, completed, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(todo.id.0)
        .bind(todo.user_id.0)
        .bind(todo.title.as_str())
        .bind(&todo.description)
        .bind(todo.completed)
        .bind(todo.created_at)
        .bind(todo.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        Ok(todo)
    }

    async fn find_by_id(
        &self,
        id: &TodoId,
        owner: &UserId,
    ) -> Result<Option<Todo>, TodoError> {
        let row: Option<TodoRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, title, description, completed, created_at, updated_at
            FROM todos
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        row.map(TodoRow::try_into_todo).transpose()
    }

    async fn list_for_user(
        &self,
        owner: &UserId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Todo>, TodoError> {
        let rows: Vec<TodoRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, title, description, completed, created_at, updated_at
            FROM todos
            WHERE user_id = $1
            ORDER BY created_at
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(owner.0)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(TodoRow::try_into_todo).collect()
    }

    async fn update(&self, todo: Todo) -> Result<Todo, TodoError> {
        let result = sqlx::query(
            r#"
            UPDATE todos
            SET title = $3, description = $4, completed = $5, updated_at = $6
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(todo.id.0)
        .bind(todo.user_id.0)
        .bind(todo.title.as_str())
        .bind(&todo.description)
        .bind(todo.completed)
        .bind(todo.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(todo.id.to_string()));
        }

        Ok(todo)
    }

    async fn delete(&self, id: &TodoId, owner: &UserId) -> Result<(), TodoError> {
        let result = sqlx::query(
            r#"
            DELETE FROM todos
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .execute(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
