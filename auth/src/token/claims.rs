use std::fmt;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::TokenError;

/// Discriminates the three token shapes sharing one encoding scheme.
///
/// The kind is embedded in the signed payload, so a refresh token can never
/// pass where an access token is expected and an exchange code can only be
/// spent at the token endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived credential authorizing API calls
    Access,
    /// Longer-lived credential exchanged for a new access/refresh pair
    Refresh,
    /// Very short-lived code used once in the OAuth handoff
    Code,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
            TokenKind::Code => "code",
        };
        f.write_str(s)
    }
}

/// Signed token payload.
///
/// The subject is the user's UUID, serialized as a string before signing.
/// `username` is only set on tokens minted from a password login; sessions
/// issued through the code-exchange flow carry the subject alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    pub kind: TokenKind,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Unique token identifier; two issuances never produce the same
    /// signed string, even within one clock second
    pub jti: String,
}

impl Claims {
    /// Build claims for `subject` expiring `ttl` from now.
    pub fn new(kind: TokenKind, subject: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.to_string(),
            username: None,
            kind,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Attach the human-facing username claim.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Parse the subject claim back into a user identity.
    ///
    /// # Errors
    /// * `InvalidSubject` - The claim does not parse as a UUID
    pub fn subject(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|e| TokenError::InvalidSubject(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims_sets_expiry_from_ttl() {
        let claims = Claims::new(TokenKind::Access, Uuid::new_v4(), Duration::minutes(30));

        assert_eq!(claims.exp - claims.iat, 30 * 60);
        assert_eq!(claims.kind, TokenKind::Access);
        assert!(claims.username.is_none());
    }

    #[test]
    fn test_subject_round_trips_through_string() {
        let id = Uuid::new_v4();
        let claims = Claims::new(TokenKind::Refresh, id, Duration::minutes(60));

        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.subject().unwrap(), id);
    }

    #[test]
    fn test_with_username() {
        let claims =
            Claims::new(TokenKind::Access, Uuid::new_v4(), Duration::minutes(30))
                .with_username("junaid");

        assert_eq!(claims.username.as_deref(), Some("junaid"));
    }

    #[test]
    fn test_malformed_subject_is_rejected() {
        let mut claims = Claims::new(TokenKind::Access, Uuid::new_v4(), Duration::minutes(30));
        claims.sub = "not-a-uuid".to_string();

        assert!(matches!(
            claims.subject(),
            Err(TokenError::InvalidSubject(_))
        ));
    }

    #[test]
    fn test_issuances_are_distinct_within_one_second() {
        let id = Uuid::new_v4();
        let first = Claims::new(TokenKind::Refresh, id, Duration::minutes(60));
        let second = Claims::new(TokenKind::Refresh, id, Duration::minutes(60));

        assert_ne!(first.jti, second.jti);
        assert_ne!(first, second);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let claims = Claims::new(TokenKind::Code, Uuid::new_v4(), Duration::minutes(3));
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["kind"], "code");
    }
}
