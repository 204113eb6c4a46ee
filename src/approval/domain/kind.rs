//! Credit kinds and request states.

use super::ParseApprovalValueError;
use crate::task::domain::CreditOptions;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of academic credit requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalKind {
    /// Diploma thesis.
    Diploma,
    /// Internship practice.
    Practice,
    /// Course project.
    Course,
}

impl ApprovalKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Diploma => "diploma",
            Self::Practice => "practice",
            Self::Course => "course",
        }
    }

    /// Returns true when a listing with `credits` can count as this kind.
    #[must_use]
    pub const fn is_offered_by(self, credits: CreditOptions) -> bool {
        match self {
            Self::Diploma => credits.diploma_possible,
            Self::Practice => credits.practice_possible,
            Self::Course => credits.course_project_possible,
        }
    }
}

impl TryFrom<&str> for ApprovalKind {
    type Error = ParseApprovalValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "diploma" => Ok(Self::Diploma),
            "practice" => Ok(Self::Practice),
            "course" => Ok(Self::Course),
            _ => Err(ParseApprovalValueError(value.to_owned())),
        }
    }
}

impl fmt::Display for ApprovalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review state of a credit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalState {
    /// Awaiting review.
    Submitted,
    /// Credit granted.
    Approved,
    /// Returned to the student for changes.
    NeedsChanges,
    /// Credit refused.
    Rejected,
}

impl ApprovalState {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::NeedsChanges => "needs_changes",
            Self::Rejected => "rejected",
        }
    }

    /// Returns true for states a reviewer may choose.
    #[must_use]
    pub const fn is_decision(self) -> bool {
        matches!(self, Self::Approved | Self::NeedsChanges | Self::Rejected)
    }

    /// Returns true while a reviewer may still decide.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Submitted | Self::NeedsChanges)
    }

    /// Returns true once no further changes are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl TryFrom<&str> for ApprovalState {
    type Error = ParseApprovalValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "submitted" => Ok(Self::Submitted),
            "approved" => Ok(Self::Approved),
            "needs_changes" => Ok(Self::NeedsChanges),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseApprovalValueError(value.to_owned())),
        }
    }
}

impl fmt::Display for ApprovalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
