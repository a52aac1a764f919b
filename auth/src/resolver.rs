use std::sync::Arc;

use uuid::Uuid;

use crate::token::TokenCodec;
use crate::token::TokenError;
use crate::token::TokenKind;

/// Resolves the bearer token on a protected request to a caller identity.
///
/// Works purely from the token: the user store is not consulted, so a
/// deleted user's still-valid token keeps resolving until it expires.
pub struct BearerResolver {
    codec: Arc<TokenCodec>,
}

/// Identity extracted from a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: Option<String>,
}

impl BearerResolver {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    /// Validate an access token and extract the caller.
    ///
    /// # Errors
    /// * `TokenError` - Bad signature, expired, wrong kind, or a subject
    ///   that is not a UUID; callers surface all of these as a 401
    pub fn resolve(&self, token: &str) -> Result<CurrentUser, TokenError> {
        let claims = self.codec.decode_kind(token, TokenKind::Access)?;
        let id = claims.subject()?;

        Ok(CurrentUser {
            id,
            username: claims.username,
        })
    }
}
