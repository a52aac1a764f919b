//! Token and credential core for the to-do service
//!
//! Provides the authentication building blocks the HTTP services compose:
//! - Password hashing (Argon2id)
//! - Signed, expiring, kind-tagged tokens (access / refresh / exchange code)
//! - Session issuance and the OAuth code/refresh grant flow
//! - Bearer-token resolution to a caller identity
//!
//! Everything here is a synchronous, stateless computation over an immutable
//! [`TokenConfig`] built once at process start. Services own the user store
//! and the HTTP mapping; this crate never does I/O.
//!
//! # Examples
//!
//! ## Password hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &digest).unwrap());
//! assert!(!hasher.verify("not_my_password", &digest).unwrap());
//! ```
//!
//! ## Issuing and resolving a session
//! ```
//! use std::sync::Arc;
//!
//! use auth::{BearerResolver, SessionIssuer, TokenCodec, TokenConfig};
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let config = TokenConfig::new(
//!     "secret_key_at_least_32_bytes_long!!",
//!     "HS256",
//!     Duration::minutes(30),
//!     Duration::minutes(60),
//! )
//! .unwrap();
//! let codec = Arc::new(TokenCodec::new(&config));
//!
//! let issuer = SessionIssuer::new(Arc::clone(&codec), config);
//! let user_id = Uuid::new_v4();
//! let session = issuer.issue_session(user_id, Some("alice")).unwrap();
//!
//! let resolver = BearerResolver::new(codec);
//! let current = resolver.resolve(&session.access_token).unwrap();
//! assert_eq!(current.id, user_id);
//! ```

pub mod config;
pub mod grant;
pub mod password;
pub mod resolver;
pub mod session;
pub mod token;

// Re-export commonly used items
pub use config::ConfigError;
pub use config::TokenConfig;
pub use grant::GrantError;
pub use grant::GrantFlow;
pub use grant::GrantRequest;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use resolver::BearerResolver;
pub use resolver::CurrentUser;
pub use session::SessionIssuer;
pub use session::SessionTokens;
pub use token::Claims;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::TokenKind;
