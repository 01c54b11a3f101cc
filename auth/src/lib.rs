//! Credential and token primitives for the shop service.
//!
//! - Password hashing (Argon2id with a configurable iteration cost)
//! - Signed, expiring identity tokens (JWT, HS256)
//! - An [`Authenticator`] that couples the two for login flows
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_cost(2).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("other", &hash).unwrap());
//! ```
//!
//! ## Identity Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let claims = Claims::for_user("user123", 48).unwrap();
//! let token = handler.encode(&claims).unwrap();
//! let decoded = handler.decode(&token).unwrap();
//! assert_eq!(decoded.sub, "user123");
//! ```
//!
//! ## Login Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", 2, 48).unwrap();
//!
//! let hash = auth.hash_password("password123").unwrap();
//! let result = auth.authenticate("password123", &hash, "user123").unwrap();
//!
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::DEFAULT_TOKEN_TTL_HOURS;
pub use jwt::MAX_TOKEN_TTL_HOURS;
pub use password::PasswordError;
pub use password::PasswordHasher;
