//! Portfolio entries generated when a student joins a project team.

use super::{PortfolioDomainError, PortfolioEntryId};
use crate::assignment::domain::{Assignment, AssignmentId};
use crate::task::domain::{TaskId, TaskTitle};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use minijinja::{Environment, context};
use mockable::Clock;
use serde::{Deserialize, Serialize};

const SUMMARY_TEMPLATE: &str = r#"Joined the project team of "{{ title }}"."#;

/// A line in a student's portfolio, one per assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    /// Entry identifier.
    pub id: PortfolioEntryId,
    /// Portfolio owner.
    pub student_id: UserId,
    /// Project the entry describes.
    pub task_id: TaskId,
    /// Assignment the entry was generated from.
    pub assignment_id: AssignmentId,
    /// Rendered summary.
    pub summary: String,
    /// Generation time.
    pub created_at: DateTime<Utc>,
}

impl PortfolioEntry {
    /// Generates the entry for an assignment that became active.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioDomainError::SummaryRender`] when the summary
    /// template fails to render.
    pub fn for_assignment(
        assignment: &Assignment,
        title: &TaskTitle,
        clock: &impl Clock,
    ) -> Result<Self, PortfolioDomainError> {
        Ok(Self {
            id: PortfolioEntryId::new(),
            student_id: assignment.student_id(),
            task_id: assignment.task_id(),
            assignment_id: assignment.id(),
            summary: render_summary(title)?,
            created_at: clock.utc(),
        })
    }
}

fn render_summary(title: &TaskTitle) -> Result<String, PortfolioDomainError> {
    Environment::new()
        .render_str(SUMMARY_TEMPLATE, context! { title => title.as_str() })
        .map_err(|error| PortfolioDomainError::SummaryRender(error.to_string()))
}
