//! Validated listing fields.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Listing title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTitle`] when the trimmed value is
    /// shorter than 3 or longer than 255 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if !(3..=255).contains(&trimmed.chars().count()) {
            return Err(TaskDomainError::InvalidTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Listing description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Creates a validated description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DescriptionTooShort`] below 10 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        if raw.trim().chars().count() < 10 {
            return Err(TaskDomainError::DescriptionTooShort);
        }
        Ok(Self(raw))
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text shown to students in place of an NDA-protected description.
    pub(super) fn nda_placeholder() -> Self {
        Self("Available after NDA acceptance".to_owned())
    }
}

/// Optional long-form project details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    /// Project goal.
    pub goal: Option<String>,
    /// Work breakdown.
    pub key_tasks: Option<String>,
    /// What is new about the project.
    pub novelty: Option<String>,
    /// Skills a participant needs.
    pub skills_required: Option<String>,
    /// Fit with university coursework.
    pub course_alignment: Option<String>,
}

/// Academic credit a project can count towards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditOptions {
    /// Usable as a diploma project.
    pub diploma_possible: bool,
    /// Usable as an internship practice.
    pub practice_possible: bool,
    /// Usable as a course project.
    pub course_project_possible: bool,
}

/// Comma-separated free-text tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(Option<String>);

impl Tags {
    /// Wraps a raw tag string; blank strings become no tags.
    #[must_use]
    pub fn new(raw: Option<String>) -> Self {
        Self(raw.filter(|text| !text.trim().is_empty()))
    }

    /// Returns the raw tag string.
    #[must_use]
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Case-insensitive substring match against the raw tag string.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.0
            .as_deref()
            .is_some_and(|tags| tags.to_lowercase().contains(&needle.to_lowercase()))
    }
}
