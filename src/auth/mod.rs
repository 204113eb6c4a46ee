//! Password hashing, token issuance and bearer-token authentication.
//!
//! Passwords are stored as argon2 PHC strings. Tokens are HS256 JWTs that
//! embed the account's token version, so bumping the version on the user
//! row revokes every token issued before it.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
