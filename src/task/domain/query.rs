//! Listing filters.

use super::{Task, TaskId, TaskStatus, Visibility};
use crate::Page;
use crate::user::domain::UserId;
use serde::Deserialize;

/// Caller-supplied search parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskQuery {
    /// Number of leading matches to skip.
    #[serde(default)]
    pub skip: usize,
    /// Maximum number of matches to return.
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Exact status match.
    pub status: Option<TaskStatus>,
    /// Case-insensitive substring of the tag string.
    pub tag: Option<String>,
    /// Case-insensitive substring of the title.
    pub q: Option<String>,
}

const fn default_limit() -> usize {
    20
}

impl TaskQuery {
    /// Returns the result window.
    #[must_use]
    pub const fn page(&self) -> Page {
        Page::new(self.skip, self.limit)
    }
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
            status: None,
            tag: None,
            q: None,
        }
    }
}

/// Which listings a caller may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskScope {
    /// Every listing.
    All,
    /// Listings created or curated by the user.
    CuratedBy(UserId),
    /// Listings the user leads or is linked to as a mentor.
    MentoredBy {
        /// The mentor.
        mentor: UserId,
        /// Listings the mentor is linked to.
        linked: Vec<TaskId>,
    },
    /// Public, running, unarchived listings.
    PublicActive,
}

impl TaskScope {
    /// Returns true when `task` falls inside the scope.
    #[must_use]
    pub fn contains(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::CuratedBy(user) => task.is_curated_by(*user),
            Self::MentoredBy { mentor, linked } => {
                task.mentor_id() == Some(*mentor) || linked.contains(&task.id())
            }
            Self::PublicActive => {
                task.visibility() == Visibility::Public
                    && task.status().is_active()
                    && !task.is_archived()
            }
        }
    }
}

/// Scope plus search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    /// Visibility scope.
    pub scope: TaskScope,
    /// Search parameters.
    pub query: TaskQuery,
}

impl TaskFilter {
    /// Creates a filter.
    #[must_use]
    pub const fn new(scope: TaskScope, query: TaskQuery) -> Self {
        Self { scope, query }
    }

    /// Returns true when `task` satisfies the scope and search parameters.
    ///
    /// Pagination is not applied here.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let status_ok = self.query.status.is_none_or(|status| task.status() == status);
        let tag_ok = self
            .query
            .tag
            .as_deref()
            .is_none_or(|tag| task.tags().matches(tag));
        let title_ok = self.query.q.as_deref().is_none_or(|needle| {
            task.title()
                .as_str()
                .to_lowercase()
                .contains(&needle.to_lowercase())
        });
        self.scope.contains(task) && status_ok && tag_ok && title_ok
    }
}
