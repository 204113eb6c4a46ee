//! Comment and question entries.

use super::{CommentDomainError, CommentId};
use crate::task::domain::TaskId;
use crate::user::domain::{Actor, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated comment text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentBody(String);

impl CommentBody {
    const MAX_LEN: usize = 2000;

    /// Creates a validated body.
    ///
    /// # Errors
    ///
    /// Returns [`CommentDomainError::InvalidBody`] when the value is blank or
    /// longer than 2000 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, CommentDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() || raw.chars().count() > Self::MAX_LEN {
            return Err(CommentDomainError::InvalidBody);
        }
        Ok(Self(raw))
    }

    /// Returns the body as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Content of a new comment or question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    /// Text.
    pub body: CommentBody,
    /// Hidden from students other than the author and recipient.
    pub is_private: bool,
    /// Addressee of a private question.
    pub recipient_id: Option<UserId>,
    /// Meeting details.
    pub meeting_info: Option<String>,
}

impl NewComment {
    /// Creates public content with no recipient.
    #[must_use]
    pub const fn public(body: CommentBody) -> Self {
        Self {
            body,
            is_private: false,
            recipient_id: None,
            meeting_info: None,
        }
    }
}

/// Author edit; `None` leaves a field unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentPatch {
    /// Replacement text.
    pub body: CommentBody,
    /// New privacy flag.
    pub is_private: Option<bool>,
    /// New addressee.
    pub recipient_id: Option<UserId>,
    /// New meeting details.
    pub meeting_info: Option<String>,
}

/// A discussion entry on a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    author_id: UserId,
    body: CommentBody,
    is_private: bool,
    recipient_id: Option<UserId>,
    meeting_info: Option<String>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCommentData {
    /// Persisted identifier.
    pub id: CommentId,
    /// Persisted listing.
    pub task_id: TaskId,
    /// Persisted author.
    pub author_id: UserId,
    /// Persisted text.
    pub body: CommentBody,
    /// Persisted privacy flag.
    pub is_private: bool,
    /// Persisted addressee.
    pub recipient_id: Option<UserId>,
    /// Persisted meeting details.
    pub meeting_info: Option<String>,
    /// Persisted creation time.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates an entry authored by `author_id`.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        author_id: UserId,
        content: NewComment,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: CommentId::new(),
            task_id,
            author_id,
            body: content.body,
            is_private: content.is_private,
            recipient_id: content.recipient_id,
            meeting_info: content.meeting_info,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCommentData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            author_id: data.author_id,
            body: data.body,
            is_private: data.is_private,
            recipient_id: data.recipient_id,
            meeting_info: data.meeting_info,
            created_at: data.created_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the listing.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the author.
    #[must_use]
    pub const fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Returns the text.
    #[must_use]
    pub const fn body(&self) -> &CommentBody {
        &self.body
    }

    /// Returns whether the entry is private.
    #[must_use]
    pub const fn is_private(&self) -> bool {
        self.is_private
    }

    /// Returns the addressee.
    #[must_use]
    pub const fn recipient_id(&self) -> Option<UserId> {
        self.recipient_id
    }

    /// Returns the meeting details.
    #[must_use]
    pub fn meeting_info(&self) -> Option<&str> {
        self.meeting_info.as_deref()
    }

    /// Returns the creation time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns true when `actor` may read the entry.
    ///
    /// Private entries are limited to the author, the recipient and
    /// non-student roles.
    #[must_use]
    pub fn is_visible_to(&self, actor: Actor) -> bool {
        !self.is_private
            || self.author_id == actor.id
            || self.recipient_id == Some(actor.id)
            || !actor.is_student()
    }

    /// Applies an author edit.
    pub fn edit(&mut self, patch: CommentPatch) {
        let CommentPatch {
            body,
            is_private,
            recipient_id,
            meeting_info,
        } = patch;
        self.body = body;
        if let Some(flag) = is_private {
            self.is_private = flag;
        }
        if recipient_id.is_some() {
            self.recipient_id = recipient_id;
        }
        if meeting_info.is_some() {
            self.meeting_info = meeting_info;
        }
    }
}
