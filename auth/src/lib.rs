//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure:
//! - Password hashing (Argon2id, tunable cost)
//! - JWT token generation and validation
//! - Authentication coordination
//!
//! Services define their own ports and adapt these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_cost(1024, 1, 1).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Login Flow
//! ```
//! use auth::{Authenticator, Claims, PasswordHasher};
//!
//! let hasher = PasswordHasher::with_cost(1024, 1, 1).unwrap();
//! let auth = Authenticator::with_password_hasher(b"secret_key_at_least_32_bytes_long!", hasher);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify, then sign a token
//! auth.verify_password("password123", &hash).unwrap();
//! let claims = Claims::for_subject("account-1", 24).with_extra("first_name", "Ada");
//! let token = auth.generate_token(&claims).unwrap();
//!
//! // Validate token
//! let decoded: Claims = auth.validate_token(&token).unwrap();
//! assert_eq!(decoded.sub.as_deref(), Some("account-1"));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
