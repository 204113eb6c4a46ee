//! Assignment lifecycle states.

use super::ParseAssignmentStateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a student's application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentState {
    /// Awaiting a staff decision.
    Requested,
    /// The student is on the team.
    Active,
    /// The student finished the project.
    Done,
    /// Rejected or withdrawn.
    Canceled,
}

impl AssignmentState {
    /// Every state, in lifecycle order.
    pub const ALL: [Self; 4] = [Self::Requested, Self::Active, Self::Done, Self::Canceled];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Active => "active",
            Self::Done => "done",
            Self::Canceled => "canceled",
        }
    }

    /// Returns true when moving to `target` is permitted.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Requested, Self::Active | Self::Canceled)
                | (Self::Active, Self::Done | Self::Canceled)
        )
    }

    /// Returns true for states that place the student on the team.
    #[must_use]
    pub const fn is_team_member(self) -> bool {
        matches!(self, Self::Active | Self::Done)
    }

    /// Returns true for states with no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Canceled)
    }
}

impl TryFrom<&str> for AssignmentState {
    type Error = ParseAssignmentStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == normalized)
            .ok_or_else(|| ParseAssignmentStateError(value.to_owned()))
    }
}

impl fmt::Display for AssignmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
