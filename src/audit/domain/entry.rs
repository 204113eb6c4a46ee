//! Audit trail entries.

use super::{AuditEntryId, ParseAuditValueError};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Business action recorded in the trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Self-registration of a new account.
    UserRegistered,
    /// A soft-deleted account was reused.
    UserReactivated,
    /// Staff created an account.
    UserCreated,
    /// Successful sign-in.
    UserLogin,
    /// A pending student was approved.
    StudentApproved,
    /// A pending student was rejected.
    StudentRejected,
    /// A student applied to a project.
    AssignmentRequested,
    /// Staff decided on an application.
    AssignmentDecided,
    /// An application was approved.
    AssignmentApproved,
    /// An application was rejected.
    AssignmentRejected,
    /// A mentor reviewed an assignment.
    ReviewCreated,
    /// A student requested academic credit.
    ApprovalSubmitted,
    /// A university reviewer decided on a credit request.
    ApprovalUpdated,
}

impl AuditAction {
    const ALL: [Self; 13] = [
        Self::UserRegistered,
        Self::UserReactivated,
        Self::UserCreated,
        Self::UserLogin,
        Self::StudentApproved,
        Self::StudentRejected,
        Self::AssignmentRequested,
        Self::AssignmentDecided,
        Self::AssignmentApproved,
        Self::AssignmentRejected,
        Self::ReviewCreated,
        Self::ApprovalSubmitted,
        Self::ApprovalUpdated,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserRegistered => "user_registered",
            Self::UserReactivated => "user_reactivated",
            Self::UserCreated => "user_created",
            Self::UserLogin => "user_login",
            Self::StudentApproved => "student_approved",
            Self::StudentRejected => "student_rejected",
            Self::AssignmentRequested => "assignment_requested",
            Self::AssignmentDecided => "assignment_decided",
            Self::AssignmentApproved => "assignment_approved",
            Self::AssignmentRejected => "assignment_rejected",
            Self::ReviewCreated => "review_created",
            Self::ApprovalSubmitted => "approval_submitted",
            Self::ApprovalUpdated => "approval_updated",
        }
    }
}

impl TryFrom<&str> for AuditAction {
    type Error = ParseAuditValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| ParseAuditValueError(value.to_owned()))
    }
}

/// Kind of entity an audit entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A user account.
    User,
    /// A project listing.
    Task,
    /// A student application.
    Assignment,
    /// A mentor review.
    Review,
    /// A credit request.
    Approval,
}

impl EntityKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Task => "task",
            Self::Assignment => "assignment",
            Self::Review => "review",
            Self::Approval => "approval",
        }
    }
}

impl TryFrom<&str> for EntityKind {
    type Error = ParseAuditValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(Self::User),
            "task" => Ok(Self::Task),
            "assignment" => Ok(Self::Assignment),
            "review" => Ok(Self::Review),
            "approval" => Ok(Self::Approval),
            _ => Err(ParseAuditValueError(value.to_owned())),
        }
    }
}

/// Reference to the entity an action touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    /// Entity kind.
    pub kind: EntityKind,
    /// Entity identifier.
    pub id: Uuid,
}

impl EntityRef {
    /// Creates an entity reference.
    #[must_use]
    pub const fn new(kind: EntityKind, id: Uuid) -> Self {
        Self { kind, id }
    }
}

/// A recorded action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry {
    /// Entry identifier.
    pub id: AuditEntryId,
    /// User who performed the action, when known.
    pub actor_id: Option<UserId>,
    /// The action.
    pub action: AuditAction,
    /// The entity the action touched.
    pub entity: EntityRef,
    /// Free-form details.
    pub metadata: Value,
    /// When the action happened.
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    /// Creates an entry stamped with the current time.
    #[must_use]
    pub fn new(
        actor_id: Option<UserId>,
        action: AuditAction,
        entity: EntityRef,
        metadata: Value,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: AuditEntryId::new(),
            actor_id,
            action,
            entity,
            metadata,
            created_at: clock.utc(),
        }
    }
}
