//! Credit request aggregate.

use super::{ApprovalDomainError, ApprovalId, ApprovalKind, ApprovalState};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Credit request for one listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    id: ApprovalId,
    task_id: TaskId,
    kind: ApprovalKind,
    state: ApprovalState,
    requested_by: UserId,
    reviewer_id: Option<UserId>,
    comment: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted credit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedApprovalData {
    /// Persisted identifier.
    pub id: ApprovalId,
    /// Persisted listing.
    pub task_id: TaskId,
    /// Persisted credit kind.
    pub kind: ApprovalKind,
    /// Persisted state.
    pub state: ApprovalState,
    /// Persisted requester.
    pub requested_by: UserId,
    /// Persisted reviewer.
    pub reviewer_id: Option<UserId>,
    /// Persisted comment.
    pub comment: Option<String>,
    /// Persisted creation time.
    pub created_at: DateTime<Utc>,
    /// Persisted update time.
    pub updated_at: DateTime<Utc>,
}

impl Approval {
    /// Creates a submitted request.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        kind: ApprovalKind,
        requested_by: UserId,
        comment: Option<String>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ApprovalId::new(),
            task_id,
            kind,
            state: ApprovalState::Submitted,
            requested_by,
            reviewer_id: None,
            comment,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a request from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedApprovalData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            kind: data.kind,
            state: data.state,
            requested_by: data.requested_by,
            reviewer_id: data.reviewer_id,
            comment: data.comment,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> ApprovalId {
        self.id
    }

    /// Returns the listing.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the credit kind.
    #[must_use]
    pub const fn kind(&self) -> ApprovalKind {
        self.kind
    }

    /// Returns the review state.
    #[must_use]
    pub const fn state(&self) -> ApprovalState {
        self.state
    }

    /// Returns the requesting student.
    #[must_use]
    pub const fn requested_by(&self) -> UserId {
        self.requested_by
    }

    /// Returns the last reviewer.
    #[must_use]
    pub const fn reviewer_id(&self) -> Option<UserId> {
        self.reviewer_id
    }

    /// Returns the latest comment.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns the creation time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update time.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Records a reviewer decision.
    ///
    /// The comment replaces the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalDomainError::NotADecision`] when `decision` is
    /// `submitted`, or [`ApprovalDomainError::InvalidStateTransition`] once
    /// the request was approved or rejected.
    pub fn review(
        &mut self,
        decision: ApprovalState,
        reviewer: UserId,
        comment: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), ApprovalDomainError> {
        if !decision.is_decision() {
            return Err(ApprovalDomainError::NotADecision(decision));
        }
        if !self.state.is_open() {
            return Err(ApprovalDomainError::InvalidStateTransition {
                from: self.state,
                to: decision,
            });
        }
        self.state = decision;
        self.reviewer_id = Some(reviewer);
        self.comment = comment;
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Sends a request that needs changes back for review.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalDomainError::InvalidStateTransition`] unless the
    /// request is in `needs_changes`.
    pub fn resubmit(
        &mut self,
        comment: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), ApprovalDomainError> {
        if self.state != ApprovalState::NeedsChanges {
            return Err(ApprovalDomainError::InvalidStateTransition {
                from: self.state,
                to: ApprovalState::Submitted,
            });
        }
        self.state = ApprovalState::Submitted;
        if comment.is_some() {
            self.comment = comment;
        }
        self.updated_at = clock.utc();
        Ok(())
    }
}
