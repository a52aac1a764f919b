use std::sync::Arc;

use thiserror::Error;

use crate::session::SessionIssuer;
use crate::session::SessionTokens;
use crate::token::TokenCodec;
use crate::token::TokenError;
use crate::token::TokenKind;

/// The two grant types the token endpoint honors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantRequest {
    /// Trade a temporary exchange code for a session
    AuthorizationCode { code: String },
    /// Trade a refresh token for a fresh pair
    RefreshToken { refresh_token: String },
}

/// Grant flow failures.
///
/// Every client-side fault collapses into `InvalidGrant`, the endpoint's
/// single 401 shape. `Issuance` means signing failed on our side and
/// surfaces as a server error instead.
#[derive(Debug, Clone, Error)]
pub enum GrantError {
    #[error("The presented grant is invalid or expired")]
    InvalidGrant,

    #[error("Failed to issue tokens: {0}")]
    Issuance(TokenError),
}

impl GrantRequest {
    /// Parse the form fields of a token-endpoint request.
    ///
    /// The mere presence of `grant_type` is enforced one layer up as a 422;
    /// by the time this runs, an unknown value or a missing operand is a
    /// credentials failure.
    ///
    /// # Errors
    /// * `InvalidGrant` - Unknown grant type, or its operand is absent
    pub fn parse(
        grant_type: &str,
        code: Option<String>,
        refresh_token: Option<String>,
    ) -> Result<Self, GrantError> {
        match grant_type {
            "authorization_code" => code
                .map(|code| GrantRequest::AuthorizationCode { code })
                .ok_or(GrantError::InvalidGrant),
            "refresh_token" => refresh_token
                .map(|refresh_token| GrantRequest::RefreshToken { refresh_token })
                .ok_or(GrantError::InvalidGrant),
            _ => Err(GrantError::InvalidGrant),
        }
    }
}

/// Token-endpoint state machine: one call per request, no state carried
/// between calls.
///
/// Rotation here means a new pair is always issued; the presented refresh
/// token is never invalidated server-side and stays usable until its own
/// expiry. There is no persisted denylist by design.
pub struct GrantFlow {
    codec: Arc<TokenCodec>,
    issuer: Arc<SessionIssuer>,
}

impl GrantFlow {
    pub fn new(codec: Arc<TokenCodec>, issuer: Arc<SessionIssuer>) -> Self {
        Self { codec, issuer }
    }

    /// Run one grant exchange to its terminal state.
    ///
    /// Both grant types end the same way: extract the subject from the
    /// presented credential, then mint a brand-new access/refresh pair with
    /// the standard TTLs.
    ///
    /// # Errors
    /// * `InvalidGrant` - The presented code/refresh token did not verify
    /// * `Issuance` - Signing the new pair failed
    pub fn exchange(&self, request: GrantRequest) -> Result<SessionTokens, GrantError> {
        let (token, expected_kind) = match &request {
            GrantRequest::AuthorizationCode { code } => (code, TokenKind::Code),
            GrantRequest::RefreshToken { refresh_token } => (refresh_token, TokenKind::Refresh),
        };

        let claims = self
            .codec
            .decode_kind(token, expected_kind)
            .map_err(|_| GrantError::InvalidGrant)?;

        let user_id = claims.subject().map_err(|_| GrantError::InvalidGrant)?;

        self.issuer
            .issue_session(user_id, claims.username.as_deref())
            .map_err(GrantError::Issuance)
    }
}
