//! Task aggregate root.

use super::{
    CreditOptions, TaskDescription, TaskDetails, TaskId, TaskStatus, TaskTitle, Tags, Visibility,
};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated content of a new listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Title.
    pub title: TaskTitle,
    /// Description.
    pub description: TaskDescription,
    /// Long-form details.
    pub details: TaskDetails,
    /// Credit the project counts towards.
    pub credits: CreditOptions,
    /// Whether participants must accept an NDA.
    pub nda_required: bool,
    /// Free-text tags.
    pub tags: Tags,
    /// Initial status.
    pub status: TaskStatus,
    /// Responsible curator.
    pub curator_id: Option<UserId>,
    /// Lead mentor.
    pub mentor_id: Option<UserId>,
    /// Application deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Visibility.
    pub visibility: Visibility,
}

impl TaskDraft {
    /// Creates a draft with default flags: open, public, no NDA.
    #[must_use]
    pub fn new(title: TaskTitle, description: TaskDescription) -> Self {
        Self {
            title,
            description,
            details: TaskDetails::default(),
            credits: CreditOptions::default(),
            nda_required: false,
            tags: Tags::default(),
            status: TaskStatus::Open,
            curator_id: None,
            mentor_id: None,
            deadline: None,
            visibility: Visibility::Public,
        }
    }
}

/// Validated partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// New title.
    pub title: Option<TaskTitle>,
    /// New description.
    pub description: Option<TaskDescription>,
    /// New goal.
    pub goal: Option<String>,
    /// New work breakdown.
    pub key_tasks: Option<String>,
    /// New novelty statement.
    pub novelty: Option<String>,
    /// New required skills.
    pub skills_required: Option<String>,
    /// New course alignment.
    pub course_alignment: Option<String>,
    /// New diploma flag.
    pub diploma_possible: Option<bool>,
    /// New practice flag.
    pub practice_possible: Option<bool>,
    /// New course project flag.
    pub course_project_possible: Option<bool>,
    /// New NDA flag.
    pub nda_required: Option<bool>,
    /// New tags.
    pub tags: Option<Tags>,
    /// New status.
    pub status: Option<TaskStatus>,
    /// New curator.
    pub curator_id: Option<UserId>,
    /// New lead mentor.
    pub mentor_id: Option<UserId>,
    /// New deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// New visibility.
    pub visibility: Option<Visibility>,
}

/// Project listing aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: TaskDescription,
    #[serde(flatten)]
    details: TaskDetails,
    #[serde(flatten)]
    credits: CreditOptions,
    nda_required: bool,
    tags: Tags,
    status: TaskStatus,
    is_archived: bool,
    created_by: UserId,
    curator_id: Option<UserId>,
    mentor_id: Option<UserId>,
    deadline: Option<DateTime<Utc>>,
    visibility: Visibility,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted details.
    pub details: TaskDetails,
    /// Persisted credit options.
    pub credits: CreditOptions,
    /// Persisted NDA flag.
    pub nda_required: bool,
    /// Persisted tags.
    pub tags: Tags,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted archive flag.
    pub is_archived: bool,
    /// Persisted creator.
    pub created_by: UserId,
    /// Persisted curator.
    pub curator_id: Option<UserId>,
    /// Persisted lead mentor.
    pub mentor_id: Option<UserId>,
    /// Persisted deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Persisted visibility.
    pub visibility: Visibility,
    /// Persisted creation time.
    pub created_at: DateTime<Utc>,
    /// Persisted update time.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new listing owned by `created_by`.
    #[must_use]
    pub fn new(draft: TaskDraft, created_by: UserId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: draft.title,
            description: draft.description,
            details: draft.details,
            credits: draft.credits,
            nda_required: draft.nda_required,
            tags: draft.tags,
            status: draft.status,
            is_archived: false,
            created_by,
            curator_id: draft.curator_id,
            mentor_id: draft.mentor_id,
            deadline: draft.deadline,
            visibility: draft.visibility,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            details: data.details,
            credits: data.credits,
            nda_required: data.nda_required,
            tags: data.tags,
            status: data.status,
            is_archived: data.is_archived,
            created_by: data.created_by,
            curator_id: data.curator_id,
            mentor_id: data.mentor_id,
            deadline: data.deadline,
            visibility: data.visibility,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the long-form details.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Returns the credit options.
    #[must_use]
    pub const fn credits(&self) -> CreditOptions {
        self.credits
    }

    /// Returns whether participants must accept an NDA.
    #[must_use]
    pub const fn nda_required(&self) -> bool {
        self.nda_required
    }

    /// Returns the tags.
    #[must_use]
    pub const fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns whether the listing is archived.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.is_archived
    }

    /// Returns the creator.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the curator.
    #[must_use]
    pub const fn curator_id(&self) -> Option<UserId> {
        self.curator_id
    }

    /// Returns the lead mentor.
    #[must_use]
    pub const fn mentor_id(&self) -> Option<UserId> {
        self.mentor_id
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the visibility.
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
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

    /// Returns true when students can currently apply.
    #[must_use]
    pub const fn accepts_applications(&self) -> bool {
        self.status.is_active() && !self.is_archived
    }

    /// Returns true when `user` created or curates the listing.
    #[must_use]
    pub fn is_curated_by(&self, user: UserId) -> bool {
        self.created_by == user || self.curator_id == Some(user)
    }

    /// Applies a partial update.
    pub fn apply(&mut self, changes: TaskChanges, clock: &impl Clock) {
        let TaskChanges {
            title,
            description,
            goal,
            key_tasks,
            novelty,
            skills_required,
            course_alignment,
            diploma_possible,
            practice_possible,
            course_project_possible,
            nda_required,
            tags,
            status,
            curator_id,
            mentor_id,
            deadline,
            visibility,
        } = changes;

        replace(&mut self.title, title);
        replace(&mut self.description, description);
        replace_some(&mut self.details.goal, goal);
        replace_some(&mut self.details.key_tasks, key_tasks);
        replace_some(&mut self.details.novelty, novelty);
        replace_some(&mut self.details.skills_required, skills_required);
        replace_some(&mut self.details.course_alignment, course_alignment);
        replace(&mut self.credits.diploma_possible, diploma_possible);
        replace(&mut self.credits.practice_possible, practice_possible);
        replace(&mut self.credits.course_project_possible, course_project_possible);
        replace(&mut self.nda_required, nda_required);
        replace(&mut self.tags, tags);
        replace(&mut self.status, status);
        replace_some(&mut self.curator_id, curator_id);
        replace_some(&mut self.mentor_id, mentor_id);
        replace_some(&mut self.deadline, deadline);
        replace(&mut self.visibility, visibility);
        self.touch(clock);
    }

    /// Closes and archives the listing.
    pub fn archive(&mut self, clock: &impl Clock) {
        self.status = TaskStatus::Closed;
        self.is_archived = true;
        self.touch(clock);
    }

    /// Reopens an archived listing.
    pub fn unarchive(&mut self, clock: &impl Clock) {
        self.status = TaskStatus::Open;
        self.is_archived = false;
        self.touch(clock);
    }

    /// Returns a copy with NDA-protected content removed.
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self {
            description: TaskDescription::nda_placeholder(),
            details: TaskDetails::default(),
            ..self.clone()
        }
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn replace<T>(field: &mut T, update: Option<T>) {
    if let Some(value) = update {
        *field = value;
    }
}

fn replace_some<T>(field: &mut Option<T>, update: Option<T>) {
    if update.is_some() {
        *field = update;
    }
}
