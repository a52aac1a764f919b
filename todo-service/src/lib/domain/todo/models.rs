use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::models::UserId;
use crate::todo::errors::TitleError;
use crate::todo::errors::TodoIdError;

/// A to-do item, always owned by exactly one user.
#[derive(Debug, Clone)]
pub struct Todo {
    pub id: TodoId,
    pub user_id: UserId,
    pub title: Title,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Todo unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(pub Uuid);

impl TodoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, TodoIdError> {
        Uuid::parse_str(s)
            .map(TodoId)
            .map_err(|e| TodoIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Title value type, bounded by the column width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    const MAX_LENGTH: usize = 54;

    /// # Errors
    /// * `Empty` - Whitespace-only or empty title
    /// * `TooLong` - Longer than 54 characters
    pub fn new(title: String) -> Result<Self, TitleError> {
        if title.trim().is_empty() {
            return Err(TitleError::Empty);
        }
        if title.len() > Self::MAX_LENGTH {
            return Err(TitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: title.len(),
            });
        }

        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command carrying the full writable state of an item; used for create and
/// for full (PUT) replacement.
#[derive(Debug)]
pub struct WriteTodoCommand {
    pub title: Title,
    pub description: Option<String>,
    pub completed: bool,
}

/// Command for partial (PATCH) updates; only set fields change.
#[derive(Debug, Default)]
pub struct PatchTodoCommand {
    pub title: Option<Title>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_bounds() {
        assert!(Title::new("buy milk".to_string()).is_ok());
        assert!(matches!(Title::new("   ".to_string()), Err(TitleError::Empty)));
        assert!(matches!(
            Title::new("x".repeat(55)),
            Err(TitleError::TooLong { .. })
        ));
        assert!(Title::new("x".repeat(54)).is_ok());
    }

    #[test]
    fn test_todo_id_round_trips() {
        let id = TodoId::new();
        assert_eq!(TodoId::from_string(&id.to_string()).unwrap(), id);
    }
}
