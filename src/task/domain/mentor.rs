//! Links between listings and additional mentors.

use super::{TaskId, TaskMentorLinkId};
use crate::user::domain::UserId;
use serde::{Deserialize, Serialize};

/// A mentor attached to a listing besides its lead mentor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskMentorLink {
    /// Link identifier.
    pub id: TaskMentorLinkId,
    /// Linked listing.
    pub task_id: TaskId,
    /// Linked mentor.
    pub mentor_id: UserId,
}

impl TaskMentorLink {
    /// Creates a new link.
    #[must_use]
    pub fn new(task_id: TaskId, mentor_id: UserId) -> Self {
        Self {
            id: TaskMentorLinkId::new(),
            task_id,
            mentor_id,
        }
    }
}
