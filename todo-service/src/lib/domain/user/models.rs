use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;

/// A registered account.
///
/// `hashed_password` is the credential hasher's PHC digest; the plaintext
/// never reaches this type.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from its string form.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type.
///
/// 3-32 characters, alphanumeric plus underscore and hyphen. Used as the
/// human-facing login key, so the constraints match the unique column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Validate and wrap a raw username.
    ///
    /// # Errors
    /// * `TooShort` / `TooLong` - Length outside 3-32
    /// * `InvalidCharacters` - Anything beyond alphanumeric, `_`, `-`
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.len();
        if length < Self::MIN_LENGTH {
            return Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        if length > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            return Err(UsernameError::InvalidCharacters);
        }

        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type, validated with an RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and wrap a raw email string.
    ///
    /// # Errors
    /// * `InvalidFormat` - Does not parse as an email address
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to register a new user with validated fields.
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    /// Plaintext; hashed by the service before it touches storage
    pub password: String,
}

impl RegisterUserCommand {
    pub fn new(username: Username, email: EmailAddress, password: String) -> Self {
        Self {
            username,
            email,
            password,
        }
    }
}
