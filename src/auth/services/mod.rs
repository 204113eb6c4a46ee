//! Application services for sign-in and token verification.

mod session;

pub use session::{AuthResult, AuthService};
