use async_trait::async_trait;

use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::user::models::UserId;
use crate::todo::errors::TodoError;

/// Persistence operations for to-do items.
///
/// Every read and write is scoped to an owner; an item belonging to another
/// user behaves exactly like a missing one.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    /// Persist a new item.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// Retrieve one of the owner's items.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &TodoId, owner: &UserId)
        -> Result<Option<Todo>, TodoError>;

    /// Retrieve a page of the owner's items, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_for_user(
        &self,
        owner: &UserId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Todo>, TodoError>;

    /// Overwrite an existing item's writable fields.
    ///
    /// # Errors
    /// * `NotFound` - No such item for this owner
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// Remove one of the owner's items.
    ///
    /// # Errors
    /// * `NotFound` - No such item for this owner
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &TodoId, owner: &UserId) -> Result<(), TodoError>;
}
