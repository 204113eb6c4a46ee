//! Assignment aggregate root.

use super::{AssignmentDomainError, AssignmentId, AssignmentState, DecisionReason, TeamRole};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Who decided on an application, when, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Decision time.
    pub at: DateTime<Utc>,
    /// Deciding staff member.
    pub by: UserId,
    /// Optional explanation.
    pub reason: Option<DecisionReason>,
}

/// A student's application to a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    id: AssignmentId,
    task_id: TaskId,
    student_id: UserId,
    state: AssignmentState,
    nda_accepted: bool,
    team_role: Option<TeamRole>,
    decision: Option<Decision>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAssignmentData {
    /// Persisted identifier.
    pub id: AssignmentId,
    /// Persisted listing.
    pub task_id: TaskId,
    /// Persisted applicant.
    pub student_id: UserId,
    /// Persisted state.
    pub state: AssignmentState,
    /// Persisted NDA acceptance.
    pub nda_accepted: bool,
    /// Persisted team role.
    pub team_role: Option<TeamRole>,
    /// Persisted decision.
    pub decision: Option<Decision>,
    /// Persisted creation time.
    pub created_at: DateTime<Utc>,
    /// Persisted update time.
    pub updated_at: DateTime<Utc>,
}

impl Assignment {
    /// Creates a new application in the `requested` state.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        student_id: UserId,
        nda_accepted: bool,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: AssignmentId::new(),
            task_id,
            student_id,
            state: AssignmentState::Requested,
            nda_accepted,
            team_role: None,
            decision: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an assignment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAssignmentData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            student_id: data.student_id,
            state: data.state,
            nda_accepted: data.nda_accepted,
            team_role: data.team_role,
            decision: data.decision,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> AssignmentId {
        self.id
    }

    /// Returns the listing applied to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the applicant.
    #[must_use]
    pub const fn student_id(&self) -> UserId {
        self.student_id
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> AssignmentState {
        self.state
    }

    /// Returns whether the applicant accepted the NDA.
    #[must_use]
    pub const fn nda_accepted(&self) -> bool {
        self.nda_accepted
    }

    /// Returns the team role.
    #[must_use]
    pub const fn team_role(&self) -> Option<&TeamRole> {
        self.team_role.as_ref()
    }

    /// Returns the latest staff decision.
    #[must_use]
    pub const fn decision(&self) -> Option<&Decision> {
        self.decision.as_ref()
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

    /// Moves to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentDomainError::InvalidStateTransition`] when the
    /// move is not permitted; the assignment is left unchanged.
    pub fn transition_to(
        &mut self,
        target: AssignmentState,
        clock: &impl Clock,
    ) -> Result<(), AssignmentDomainError> {
        if !self.state.can_transition_to(target) {
            return Err(AssignmentDomainError::InvalidStateTransition {
                from: self.state,
                to: target,
            });
        }
        self.state = target;
        self.touch(clock);
        Ok(())
    }

    /// Records a staff decision on a pending application and moves to
    /// `target`.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentDomainError::InvalidStateTransition`] unless the
    /// application is `requested` and the move is permitted.
    pub fn decide(
        &mut self,
        target: AssignmentState,
        by: UserId,
        reason: Option<DecisionReason>,
        clock: &impl Clock,
    ) -> Result<(), AssignmentDomainError> {
        if self.state != AssignmentState::Requested {
            return Err(AssignmentDomainError::InvalidStateTransition {
                from: self.state,
                to: target,
            });
        }
        self.transition_to(target, clock)?;
        self.decision = Some(Decision {
            at: self.updated_at,
            by,
            reason,
        });
        Ok(())
    }

    /// Sets the team role, recording who assigned it.
    pub fn assign_team_role(&mut self, role: TeamRole, by: UserId, clock: &impl Clock) {
        self.team_role = Some(role);
        self.touch(clock);
        let reason = self.decision.take().and_then(|previous| previous.reason);
        self.decision = Some(Decision {
            at: self.updated_at,
            by,
            reason,
        });
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
