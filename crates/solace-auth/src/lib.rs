//! Solace authentication.
//!
//! Passwords are stored as argon2id PHC strings. Sessions are stateless
//! HS256 tokens with a fixed seven-day lifetime; there is no revocation
//! list, so logging out only drops the client's copy.

pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use error::AuthError;
pub use service::{AuthService, Session};
pub use token::TokenIssuer;
