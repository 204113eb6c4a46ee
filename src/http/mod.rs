//! REST surface built on axum.
//!
//! Handlers stay thin: they extract the caller and payload, delegate to a
//! service held in [`AppState`] and render the result as JSON. Every failure
//! becomes an [`ApiError`] with a `{"detail": .., "error": true}` body.

mod error;
mod extract;
mod routes;
mod state;
mod views;

pub use error::ApiError;
pub use extract::AuthUser;
pub use routes::router;
pub use state::{AppState, Repositories};
pub use views::UserView;

#[cfg(test)]
mod tests;
