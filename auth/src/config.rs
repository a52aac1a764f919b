use chrono::Duration;
use jsonwebtoken::Algorithm;
use thiserror::Error;

/// Signing configuration shared by every token operation.
///
/// Built once at process start from the environment and passed by reference
/// into the codec and issuers; the process must refuse to start when the
/// secret or algorithm is missing rather than sign unverifiable tokens.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    secret: String,
    pub algorithm: Algorithm,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
    pub exchange_code_ttl: Duration,
}

/// Fatal startup errors for the token subsystem.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("No signing secret set for authentication")]
    MissingSecret,

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

impl TokenConfig {
    /// Exchange codes are handed straight to the OAuth client and traded in
    /// immediately, so they live far shorter than a session.
    const DEFAULT_EXCHANGE_CODE_TTL_SECONDS: i64 = 180;

    /// Validate and freeze the signing configuration.
    ///
    /// # Arguments
    /// * `secret` - Symmetric signing secret (at least 32 bytes for HS256)
    /// * `algorithm` - Algorithm name; only the HMAC family is accepted
    /// * `access_ttl` - Lifetime of access tokens
    /// * `refresh_ttl` - Lifetime of refresh tokens
    ///
    /// # Errors
    /// * `MissingSecret` - The secret is empty
    /// * `UnsupportedAlgorithm` - The name is unknown or not HMAC
    pub fn new(
        secret: impl Into<String>,
        algorithm: &str,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }

        let algorithm = match algorithm {
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            other => return Err(ConfigError::UnsupportedAlgorithm(other.to_string())),
        };

        Ok(Self {
            secret,
            algorithm,
            access_ttl,
            refresh_ttl,
            exchange_code_ttl: Duration::seconds(Self::DEFAULT_EXCHANGE_CODE_TTL_SECONDS),
        })
    }

    /// Override the exchange-code lifetime.
    pub fn with_exchange_code_ttl(mut self, ttl: Duration) -> Self {
        self.exchange_code_ttl = ttl;
        self
    }

    pub fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = TokenConfig::new(
            "secret_key_at_least_32_bytes_long!!",
            "HS256",
            Duration::minutes(30),
            Duration::minutes(60),
        )
        .expect("Failed to build config");

        assert_eq!(config.algorithm, Algorithm::HS256);
        assert_eq!(config.access_ttl, Duration::minutes(30));
        assert_eq!(config.refresh_ttl, Duration::minutes(60));
        assert_eq!(config.exchange_code_ttl, Duration::seconds(180));
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        let result = TokenConfig::new("", "HS256", Duration::minutes(30), Duration::minutes(60));
        assert!(matches!(result, Err(ConfigError::MissingSecret)));
    }

    #[test]
    fn test_non_hmac_algorithm_is_rejected() {
        let result = TokenConfig::new(
            "secret_key_at_least_32_bytes_long!!",
            "RS256",
            Duration::minutes(30),
            Duration::minutes(60),
        );
        assert!(matches!(result, Err(ConfigError::UnsupportedAlgorithm(_))));
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        let result = TokenConfig::new(
            "secret_key_at_least_32_bytes_long!!",
            "hs256",
            Duration::minutes(30),
            Duration::minutes(60),
        );
        assert!(matches!(result, Err(ConfigError::UnsupportedAlgorithm(_))));
    }

    #[test]
    fn test_exchange_code_ttl_override() {
        let config = TokenConfig::new(
            "secret_key_at_least_32_bytes_long!!",
            "HS512",
            Duration::minutes(30),
            Duration::minutes(60),
        )
        .unwrap()
        .with_exchange_code_ttl(Duration::hours(2));

        assert_eq!(config.exchange_code_ttl, Duration::hours(2));
    }
}
