use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TokenKind;
use super::errors::TokenError;
use crate::config::TokenConfig;

/// Signs and verifies the compact token format.
///
/// Pure function of its inputs and the static signing configuration; safe to
/// share across request handlers without locking.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret()),
            decoding_key: DecodingKey::from_secret(config.secret()),
            algorithm: config.algorithm,
        }
    }

    /// Serialize and sign claims into a compact token string.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify signature and expiry, returning the claims.
    ///
    /// Expiry is checked with zero leeway: a token is rejected the moment
    /// the wall clock passes its `exp`.
    ///
    /// # Errors
    /// * `Expired` - The expiry has passed
    /// * `Invalid` - Bad signature, malformed structure, or missing claims
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            }
        })?;

        Ok(data.claims)
    }

    /// Decode, additionally requiring the embedded kind tag to match.
    ///
    /// # Errors
    /// * `KindMismatch` - The token is valid but of the wrong kind
    /// * plus everything `decode` can fail with
    pub fn decode_kind(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        let claims = self.decode(token)?;

        if claims.kind != expected {
            return Err(TokenError::KindMismatch {
                expected,
                actual: claims.kind,
            });
        }

        Ok(claims)
    }
}
