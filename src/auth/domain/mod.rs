//! Credential and token primitives.

mod error;
mod password;
mod token;

pub use error::AuthError;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenCodec, TokenKind, TokenPair};
