use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::config::TokenConfig;
use crate::token::Claims;
use crate::token::TokenCodec;
use crate::token::TokenError;
use crate::token::TokenKind;

/// Mints the signed credentials a client holds after authenticating.
pub struct SessionIssuer {
    codec: Arc<TokenCodec>,
    config: TokenConfig,
}

/// Access/refresh pair returned by login and by the grant flow.
///
/// `expires_in` is the access-token lifetime in seconds; the response layer
/// adds the constant `token_type: "bearer"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

impl SessionIssuer {
    pub fn new(codec: Arc<TokenCodec>, config: TokenConfig) -> Self {
        Self { codec, config }
    }

    /// Issue an access/refresh pair for an authenticated user.
    ///
    /// Pass the username for password logins; sessions minted from an
    /// exchange code have none.
    ///
    /// # Errors
    /// * `TokenError` - Signing failed
    pub fn issue_session(
        &self,
        user_id: Uuid,
        username: Option<&str>,
    ) -> Result<SessionTokens, TokenError> {
        let mut access = Claims::new(TokenKind::Access, user_id, self.config.access_ttl);
        let mut refresh = Claims::new(TokenKind::Refresh, user_id, self.config.refresh_ttl);

        if let Some(username) = username {
            access = access.with_username(username);
            refresh = refresh.with_username(username);
        }

        Ok(SessionTokens {
            access_token: self.codec.encode(&access)?,
            refresh_token: self.codec.encode(&refresh)?,
            expires_in: self.config.access_ttl.num_seconds(),
        })
    }

    /// Issue the short-lived code handed to the OAuth client, which trades
    /// it for a session at the token endpoint.
    ///
    /// # Errors
    /// * `TokenError` - Signing failed
    pub fn issue_exchange_code(&self, user_id: Uuid) -> Result<String, TokenError> {
        let claims = Claims::new(TokenKind::Code, user_id, self.config.exchange_code_ttl);
        self.codec.encode(&claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn issuer() -> SessionIssuer {
        let config = TokenConfig::new(
            "test_secret_key_at_least_32_bytes!",
            "HS256",
            Duration::minutes(30),
            Duration::minutes(60),
        )
        .unwrap();
        let codec = Arc::new(TokenCodec::new(&config));
        SessionIssuer::new(codec, config)
    }

    fn decode(issuer: &SessionIssuer, token: &str) -> Claims {
        issuer.codec.decode(token).expect("Failed to decode token")
    }

    #[test]
    fn test_login_session_carries_subject_and_username() {
        let issuer = issuer();
        let user_id = Uuid::new_v4();

        let session = issuer
            .issue_session(user_id, Some("junaid"))
            .expect("Failed to issue session");

        assert!(!session.access_token.is_empty());
        assert!(!session.refresh_token.is_empty());
        assert_ne!(session.access_token, session.refresh_token);
        assert_eq!(session.expires_in, 30 * 60);

        let access = decode(&issuer, &session.access_token);
        assert_eq!(access.kind, TokenKind::Access);
        assert_eq!(access.subject().unwrap(), user_id);
        assert_eq!(access.username.as_deref(), Some("junaid"));

        let refresh = decode(&issuer, &session.refresh_token);
        assert_eq!(refresh.kind, TokenKind::Refresh);
        assert_eq!(refresh.subject().unwrap(), user_id);
    }

    #[test]
    fn test_refresh_outlives_access() {
        let issuer = issuer();
        let session = issuer.issue_session(Uuid::new_v4(), None).unwrap();

        let access = decode(&issuer, &session.access_token);
        let refresh = decode(&issuer, &session.refresh_token);

        assert!(refresh.exp > access.exp);
    }

    #[test]
    fn test_exchange_code_is_code_kind_with_subject_only() {
        let issuer = issuer();
        let user_id = Uuid::new_v4();

        let code = issuer
            .issue_exchange_code(user_id)
            .expect("Failed to issue code");

        let claims = decode(&issuer, &code);
        assert_eq!(claims.kind, TokenKind::Code);
        assert_eq!(claims.subject().unwrap(), user_id);
        assert!(claims.username.is_none());
        assert_eq!(claims.exp - claims.iat, 180);
    }

    #[test]
    fn test_anonymous_session_has_no_username_claim() {
        let issuer = issuer();
        let session = issuer.issue_session(Uuid::new_v4(), None).unwrap();

        let access = decode(&issuer, &session.access_token);
        assert!(access.username.is_none());
    }
}
