//! Domain model for user accounts.
//!
//! Accounts carry a role, a status and a token version. Soft-deleted
//! accounts keep their row so the email stays reserved and can be
//! reactivated by a later sign-up.

mod actor;
mod credentials;
mod error;
mod ids;
mod role;
mod user;

pub use actor::Actor;
pub use credentials::{Email, FullName, Password};
pub use error::{AccessDenied, ParseRoleError, ParseUserStatusError, UserDomainError};
pub use ids::UserId;
pub use role::{Role, UserStatus};
pub use user::{AccessBlock, AccountFields, PersistedUserData, User, UserProfile};
