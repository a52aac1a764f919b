use thiserror::Error;

use super::claims::TokenKind;

/// Error type for token encode/decode operations.
///
/// A token is binary valid/invalid: every decode failure is one of these,
/// and callers map them all to a 401.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),

    #[error("Token kind mismatch: expected {expected}, got {actual}")]
    KindMismatch {
        expected: TokenKind,
        actual: TokenKind,
    },

    #[error("Token subject is not a valid user identity: {0}")]
    InvalidSubject(String),
}
