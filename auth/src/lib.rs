//! Credential primitives for the geopost service
//!
//! Provides the building blocks the service composes into its login flow:
//! - Password hashing and verification (Argon2id, PHC strings)
//! - Signed identity assertions (HS256 JWT) carrying a user identifier
//! - An `Authenticator` that combines both behind one secret
//!
//! The signing secret is handed over at construction and never stored
//! anywhere else, so every component can be built in isolation in tests.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Identity Assertions
//! ```
//! use auth::{Claims, JwtHandler};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_user("user123", Some(24));
//! let token = handler.encode(&claims).unwrap();
//! assert_eq!(handler.decode(&token).unwrap(), claims);
//! ```
//!
//! ## Login Flow
//! ```
//! use auth::{Authenticator, Claims};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let claims = Claims::for_user("user123", None);
//! let result = auth.authenticate("password123", &hash, &claims).unwrap();
//!
//! // Later requests: validate token
//! let decoded = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.subject(), "user123");
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
pub use password::PasswordError;
pub use password::PasswordHasher;
