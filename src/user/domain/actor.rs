//! Authenticated caller identity passed into services.

use super::{AccessDenied, Role, User, UserId};

/// The authenticated user performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// Acting user.
    pub id: UserId,
    /// Role the user currently holds.
    pub role: Role,
}

impl Actor {
    /// Creates an actor from its parts.
    #[must_use]
    pub const fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    /// Checks that the actor holds one of `roles`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied`] otherwise.
    pub fn require_any(self, roles: &[Role]) -> Result<(), AccessDenied> {
        if roles.contains(&self.role) {
            Ok(())
        } else {
            Err(AccessDenied)
        }
    }

    /// Returns true for the student role.
    #[must_use]
    pub const fn is_student(self) -> bool {
        self.role.is_student()
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self::new(user.id(), user.role())
    }
}
