//! Validated assignment fields.

use super::AssignmentDomainError;
use serde::{Deserialize, Serialize};

/// Role a student plays within a project team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamRole(String);

impl TeamRole {
    /// Creates a validated team role.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentDomainError::InvalidTeamRole`] when the trimmed
    /// value is empty or longer than 100 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, AssignmentDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if !(1..=100).contains(&trimmed.chars().count()) {
            return Err(AssignmentDomainError::InvalidTeamRole);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the role as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Explanation attached to a staff decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionReason(String);

impl DecisionReason {
    /// Creates a validated reason.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentDomainError::DecisionReasonTooLong`] above 500
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, AssignmentDomainError> {
        let raw = value.into();
        if raw.chars().count() > 500 {
            return Err(AssignmentDomainError::DecisionReasonTooLong);
        }
        Ok(Self(raw))
    }

    /// Returns the reason as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
