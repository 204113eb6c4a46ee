//! `PostgreSQL` repository implementation for student applications.

use super::{models::AssignmentRow, schema::assignments};
use crate::Page;
use crate::assignment::{
    domain::{
        Assignment, AssignmentId, AssignmentState, Decision, DecisionReason,
        PersistedAssignmentData, TeamRole,
    },
    ports::{
        AssignmentRepository, AssignmentRepositoryError, AssignmentRepositoryResult,
        AssignmentStateCounts,
    },
};
use crate::db::{self, PgPool};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

const PAIR_CONSTRAINT: &str = "uq_task_student";

/// `PostgreSQL`-backed assignment repository.
#[derive(Debug, Clone)]
pub struct PostgresAssignmentRepository {
    pool: PgPool,
}

impl PostgresAssignmentRepository {
    /// Creates a repository over a shared connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignmentRepository for PostgresAssignmentRepository {
    async fn store(&self, assignment: &Assignment) -> AssignmentRepositoryResult<()> {
        let row = to_row(assignment);
        let id = assignment.id();
        let task_id = assignment.task_id();
        let student_id = assignment.student_id();
        db::run_blocking(&self.pool, move |connection| {
            diesel::insert_into(assignments::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| {
                    if db::is_unique_violation(&err, PAIR_CONSTRAINT) {
                        return AssignmentRepositoryError::DuplicateApplication {
                            task_id,
                            student_id,
                        };
                    }
                    match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            AssignmentRepositoryError::DuplicateAssignment(id)
                        }
                        other => AssignmentRepositoryError::persistence(other),
                    }
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, assignment: &Assignment) -> AssignmentRepositoryResult<()> {
        let row = to_row(assignment);
        let id = assignment.id();
        db::run_blocking(&self.pool, move |connection| {
            let updated =
                diesel::update(assignments::table.filter(assignments::id.eq(id.into_inner())))
                    .set(&row)
                    .execute(connection)
                    .map_err(AssignmentRepositoryError::persistence)?;
            if updated == 0 {
                return Err(AssignmentRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: AssignmentId) -> AssignmentRepositoryResult<Option<Assignment>> {
        db::run_blocking(&self.pool, move |connection| {
            assignments::table
                .filter(assignments::id.eq(id.into_inner()))
                .select(AssignmentRow::as_select())
                .first::<AssignmentRow>(connection)
                .optional()
                .map_err(AssignmentRepositoryError::persistence)?
                .map(row_to_assignment)
                .transpose()
        })
        .await
    }

    async fn find_by_task_and_student(
        &self,
        task_id: TaskId,
        student_id: UserId,
    ) -> AssignmentRepositoryResult<Option<Assignment>> {
        db::run_blocking(&self.pool, move |connection| {
            assignments::table
                .filter(assignments::task_id.eq(task_id.into_inner()))
                .filter(assignments::student_id.eq(student_id.into_inner()))
                .select(AssignmentRow::as_select())
                .first::<AssignmentRow>(connection)
                .optional()
                .map_err(AssignmentRepositoryError::persistence)?
                .map(row_to_assignment)
                .transpose()
        })
        .await
    }

    async fn list_for_student(
        &self,
        student_id: UserId,
        page: Page,
    ) -> AssignmentRepositoryResult<Vec<Assignment>> {
        db::run_blocking(&self.pool, move |connection| {
            assignments::table
                .filter(assignments::student_id.eq(student_id.into_inner()))
                .order((assignments::created_at.desc(), assignments::id.desc()))
                .offset(page.offset_i64())
                .limit(page.limit_i64())
                .select(AssignmentRow::as_select())
                .load::<AssignmentRow>(connection)
                .map_err(AssignmentRepositoryError::persistence)?
                .into_iter()
                .map(row_to_assignment)
                .collect()
        })
        .await
    }

    async fn list_for_task(&self, task_id: TaskId) -> AssignmentRepositoryResult<Vec<Assignment>> {
        db::run_blocking(&self.pool, move |connection| {
            assignments::table
                .filter(assignments::task_id.eq(task_id.into_inner()))
                .order((assignments::created_at.asc(), assignments::id.asc()))
                .select(AssignmentRow::as_select())
                .load::<AssignmentRow>(connection)
                .map_err(AssignmentRepositoryError::persistence)?
                .into_iter()
                .map(row_to_assignment)
                .collect()
        })
        .await
    }

    async fn count_in_state(&self, state: AssignmentState) -> AssignmentRepositoryResult<u64> {
        db::run_blocking(&self.pool, move |connection| {
            let count: i64 = assignments::table
                .filter(assignments::state.eq(state.as_str()))
                .count()
                .get_result(connection)
                .map_err(AssignmentRepositoryError::persistence)?;
            Ok(u64::try_from(count).unwrap_or_default())
        })
        .await
    }

    async fn state_counts_for_student(
        &self,
        student_id: UserId,
    ) -> AssignmentRepositoryResult<AssignmentStateCounts> {
        db::run_blocking(&self.pool, move |connection| {
            let rows = assignments::table
                .filter(assignments::student_id.eq(student_id.into_inner()))
                .group_by(assignments::state)
                .select((assignments::state, count_star()))
                .load::<(String, i64)>(connection)
                .map_err(AssignmentRepositoryError::persistence)?;
            rows.into_iter()
                .map(|(state, count)| {
                    let parsed = AssignmentState::try_from(state.as_str())
                        .map_err(AssignmentRepositoryError::persistence)?;
                    Ok((parsed, u64::try_from(count).unwrap_or_default()))
                })
                .collect()
        })
        .await
    }
}

fn to_row(assignment: &Assignment) -> AssignmentRow {
    let decision = assignment.decision();
    AssignmentRow {
        id: assignment.id().into_inner(),
        task_id: assignment.task_id().into_inner(),
        student_id: assignment.student_id().into_inner(),
        state: assignment.state().as_str().to_owned(),
        nda_accepted: assignment.nda_accepted(),
        team_role: assignment.team_role().map(|role| role.as_str().to_owned()),
        decision_at: decision.map(|found| found.at),
        decision_by: decision.map(|found| found.by.into_inner()),
        decision_reason: decision
            .and_then(|found| found.reason.as_ref())
            .map(|reason| reason.as_str().to_owned()),
        created_at: assignment.created_at(),
        updated_at: assignment.updated_at(),
    }
}

fn row_to_assignment(row: AssignmentRow) -> AssignmentRepositoryResult<Assignment> {
    let state = AssignmentState::try_from(row.state.as_str())
        .map_err(AssignmentRepositoryError::persistence)?;
    let team_role = row
        .team_role
        .map(TeamRole::new)
        .transpose()
        .map_err(AssignmentRepositoryError::persistence)?;
    let reason = row
        .decision_reason
        .map(DecisionReason::new)
        .transpose()
        .map_err(AssignmentRepositoryError::persistence)?;
    let decision = match (row.decision_at, row.decision_by) {
        (Some(at), Some(by)) => Some(Decision {
            at,
            by: UserId::from_uuid(by),
            reason,
        }),
        _ => None,
    };

    Ok(Assignment::from_persisted(PersistedAssignmentData {
        id: AssignmentId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        student_id: UserId::from_uuid(row.student_id),
        state,
        nda_accepted: row.nda_accepted,
        team_role,
        decision,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
