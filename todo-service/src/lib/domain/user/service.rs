use std::sync::Arc;

use chrono::Utc;

use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Domain service for registration and credential checks.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    /// Register a new user, hashing the password before storage.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` / `EmailAlreadyExists` - Uniqueness violated
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    pub async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let hashed_password = self.password_hasher.hash(&command.password)?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            hashed_password,
            created_at: Utc::now(),
        };

        self.repository.create(user).await
    }

    /// Check a username/password pair against the store.
    ///
    /// An unknown username and a wrong password are indistinguishable to the
    /// caller. Any number of attempts are permitted; there is no lockout or
    /// attempt counting.
    ///
    /// # Errors
    /// * `InvalidCredentials` - No such user, or the password does not match
    /// * `Password` - The stored digest is malformed
    /// * `DatabaseError` - Database operation failed
    pub async fn authenticate(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<User, UserError> {
        let user = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !self
            .password_hasher
            .verify(password, &user.hashed_password)?
        {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Retrieve a user by identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    pub async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}
