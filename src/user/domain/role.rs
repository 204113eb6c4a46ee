//! Platform roles and account status.

use super::{ParseRoleError, ParseUserStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role held by a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Student applying to projects.
    Student,
    /// Curator owning project listings.
    Curator,
    /// Mentor guiding project teams.
    Mentor,
    /// Programme manager.
    Manager,
    /// Platform administrator.
    Admin,
    /// University teacher reviewing credit requests.
    UnivTeacher,
    /// University supervisor reviewing credit requests.
    UnivSupervisor,
    /// University administrator.
    UnivAdmin,
    /// HR specialist browsing student outcomes.
    Hr,
    /// Academic partnership administrator.
    AcademicPartnershipAdmin,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Student,
        Self::Curator,
        Self::Mentor,
        Self::Manager,
        Self::Admin,
        Self::UnivTeacher,
        Self::UnivSupervisor,
        Self::UnivAdmin,
        Self::Hr,
        Self::AcademicPartnershipAdmin,
    ];

    /// Roles that review academic credit requests.
    pub const UNIVERSITY: [Self; 3] = [Self::UnivTeacher, Self::UnivSupervisor, Self::UnivAdmin];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Curator => "curator",
            Self::Mentor => "mentor",
            Self::Manager => "manager",
            Self::Admin => "admin",
            Self::UnivTeacher => "univ_teacher",
            Self::UnivSupervisor => "univ_supervisor",
            Self::UnivAdmin => "univ_admin",
            Self::Hr => "hr",
            Self::AcademicPartnershipAdmin => "academic_partnership_admin",
        }
    }

    /// Returns true for the university reviewer roles.
    #[must_use]
    pub const fn is_university(self) -> bool {
        matches!(
            self,
            Self::UnivTeacher | Self::UnivSupervisor | Self::UnivAdmin
        )
    }

    /// Returns true for roles that run projects day to day.
    #[must_use]
    pub const fn is_staff(self) -> bool {
        matches!(
            self,
            Self::Curator | Self::Mentor | Self::Manager | Self::Admin
        )
    }

    /// Returns true for the student role.
    #[must_use]
    pub const fn is_student(self) -> bool {
        matches!(self, Self::Student)
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| ParseRoleError(value.to_owned()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// Awaiting approval by a manager.
    Pending,
    /// Allowed to log in.
    Active,
    /// Blocked from logging in.
    Disabled,
}

impl UserStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Disabled => "disabled",
        }
    }
}

impl TryFrom<&str> for UserStatus {
    type Error = ParseUserStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "disabled" => Ok(Self::Disabled),
            _ => Err(ParseUserStatusError(value.to_owned())),
        }
    }
}
