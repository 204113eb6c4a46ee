//! Programme management: listings, applications, staff and students.

use super::acknowledged;
use crate::Page;
use crate::assignment::domain::{Assignment, AssignmentId};
use crate::http::{
    error::ApiError,
    extract::{AuthUser, PathParams, Payload, QueryParams},
    state::AppState,
    views::{self, UserView},
};
use crate::reporting::domain::{
    ApplicationWithStudent, HrStudentSummary, ManagerDashboard, StudentStats, StudentSummary,
    StudentWithStats,
};
use crate::task::domain::{Task, TaskId, TaskMentorLink, TaskQuery};
use crate::task::services::{LinkedMentor, NewTask, TaskPatch};
use crate::user::domain::{Role, UserId};
use crate::user::services::CreateMemberRequest;
use axum::extract::State;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;

/// Roles with access to every management endpoint.
const MANAGEMENT: [Role; 2] = [Role::Manager, Role::Admin];

#[derive(Debug, Deserialize)]
struct StaffBody {
    email: String,
    full_name: String,
    password: String,
    role: Role,
    faculty: Option<String>,
    skills: Option<String>,
    course: Option<String>,
}

impl StaffBody {
    fn into_request(self) -> CreateMemberRequest {
        let mut request =
            CreateMemberRequest::new(self.email, self.full_name, self.password, self.role);
        if let Some(faculty) = self.faculty {
            request = request.with_faculty(faculty);
        }
        if let Some(skills) = self.skills {
            request = request.with_skills(skills);
        }
        if let Some(course) = self.course {
            request = request.with_course(course);
        }
        request
    }
}

#[derive(Debug, Deserialize)]
struct MentorQuery {
    mentor_id: UserId,
}

#[derive(Debug, Deserialize)]
struct RejectQuery {
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TeamRoleQuery {
    role: String,
}

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/:task_id", get(get_project).patch(update_project))
        .route("/projects/:task_id/archive", post(archive_project))
        .route("/projects/:task_id/unarchive", post(unarchive_project))
        .route("/projects/:task_id/applications", get(project_applications))
        .route(
            "/projects/:task_id/mentors",
            get(project_mentors).post(link_mentor),
        )
        .route(
            "/projects/:task_id/mentors/:mentor_id",
            delete(unlink_mentor),
        )
        .route("/applications/:assignment_id/approve", post(approve_application))
        .route("/applications/:assignment_id/reject", post(reject_application))
        .route("/applications/:assignment_id/role", patch(set_team_role))
        .route("/mentors", get(list_mentors).post(create_mentor))
        .route("/mentors/:user_id", delete(remove_mentor))
        .route("/curators", get(list_curators).post(create_curator))
        .route("/curators/:user_id", delete(remove_curator))
        .route("/students", get(students))
        .route("/students/pending", get(pending_students))
        .route("/students/:user_id/approve", post(approve_student))
        .route("/students/:user_id/reject", post(reject_student))
        .route("/students/:user_id/stats", get(student_stats))
}

pub(super) fn hr_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(hr_dashboard))
}

async fn dashboard(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<ManagerDashboard>, ApiError> {
    Ok(Json(state.reports.manager_dashboard(caller.actor()).await?))
}

async fn list_projects(
    State(state): State<AppState>,
    caller: AuthUser,
    QueryParams(page): QueryParams<Page>,
) -> Result<Json<Vec<Task>>, ApiError> {
    caller.actor().require_any(&MANAGEMENT)?;
    let query = TaskQuery {
        skip: page.skip,
        limit: page.limit,
        ..TaskQuery::default()
    };
    Ok(Json(state.catalog.list(query).await?))
}

async fn create_project(
    State(state): State<AppState>,
    caller: AuthUser,
    Payload(body): Payload<NewTask>,
) -> Result<Json<Task>, ApiError> {
    let actor = caller.actor();
    actor.require_any(&MANAGEMENT)?;
    Ok(Json(state.catalog.create(actor, body).await?))
}

async fn get_project(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(task_id): PathParams<TaskId>,
) -> Result<Json<Task>, ApiError> {
    caller.actor().require_any(&MANAGEMENT)?;
    Ok(Json(state.catalog.find(task_id).await?))
}

async fn update_project(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(task_id): PathParams<TaskId>,
    Payload(body): Payload<TaskPatch>,
) -> Result<Json<Task>, ApiError> {
    let actor = caller.actor();
    actor.require_any(&MANAGEMENT)?;
    Ok(Json(state.catalog.update(actor, task_id, body).await?))
}

async fn archive_project(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(task_id): PathParams<TaskId>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(state.catalog.archive(caller.actor(), task_id).await?))
}

async fn unarchive_project(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(task_id): PathParams<TaskId>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(state.catalog.unarchive(caller.actor(), task_id).await?))
}

async fn project_applications(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(task_id): PathParams<TaskId>,
) -> Result<Json<Vec<ApplicationWithStudent>>, ApiError> {
    let rows = state
        .reports
        .applications_for_task(caller.actor(), task_id)
        .await?;
    Ok(Json(rows))
}

async fn project_mentors(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(task_id): PathParams<TaskId>,
) -> Result<Json<Vec<LinkedMentor>>, ApiError> {
    caller.actor().require_any(&MANAGEMENT)?;
    Ok(Json(state.mentor_links.list(task_id).await?))
}

async fn link_mentor(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(task_id): PathParams<TaskId>,
    QueryParams(query): QueryParams<MentorQuery>,
) -> Result<Json<TaskMentorLink>, ApiError> {
    let link = state
        .mentor_links
        .assign(caller.actor(), task_id, query.mentor_id)
        .await?;
    Ok(Json(link))
}

async fn unlink_mentor(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams((task_id, mentor_id)): PathParams<(TaskId, UserId)>,
) -> Result<Json<Value>, ApiError> {
    state
        .mentor_links
        .remove(caller.actor(), task_id, mentor_id)
        .await?;
    Ok(acknowledged("Mentor removed"))
}

async fn approve_application(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(assignment_id): PathParams<AssignmentId>,
) -> Result<Json<Assignment>, ApiError> {
    let assignment = state
        .applications
        .approve(caller.actor(), assignment_id)
        .await?;
    Ok(Json(assignment))
}

async fn reject_application(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(assignment_id): PathParams<AssignmentId>,
    QueryParams(query): QueryParams<RejectQuery>,
) -> Result<Json<Assignment>, ApiError> {
    let assignment = state
        .applications
        .reject(caller.actor(), assignment_id, query.reason)
        .await?;
    Ok(Json(assignment))
}

async fn set_team_role(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(assignment_id): PathParams<AssignmentId>,
    QueryParams(query): QueryParams<TeamRoleQuery>,
) -> Result<Json<Assignment>, ApiError> {
    let assignment = state
        .applications
        .set_team_role(caller.actor(), assignment_id, query.role)
        .await?;
    Ok(Json(assignment))
}

async fn create_staff(
    state: &AppState,
    caller: &AuthUser,
    body: StaffBody,
    role: Role,
) -> Result<Json<UserView>, ApiError> {
    let user = state
        .accounts
        .create_staff_member(caller.actor(), body.into_request(), role)
        .await?;
    Ok(Json(UserView::from(user)))
}

async fn list_staff(
    state: &AppState,
    caller: &AuthUser,
    role: Role,
) -> Result<Json<Vec<UserView>>, ApiError> {
    caller.actor().require_any(&MANAGEMENT)?;
    let members = state.accounts.list_active_by_role(role).await?;
    Ok(Json(views::users(&members)))
}

async fn remove_staff(
    state: &AppState,
    caller: &AuthUser,
    user_id: UserId,
    role: Role,
) -> Result<Json<UserView>, ApiError> {
    let user = state
        .accounts
        .remove_member(caller.actor(), user_id, role)
        .await?;
    Ok(Json(UserView::from(user)))
}

async fn create_mentor(
    State(state): State<AppState>,
    caller: AuthUser,
    Payload(body): Payload<StaffBody>,
) -> Result<Json<UserView>, ApiError> {
    create_staff(&state, &caller, body, Role::Mentor).await
}

async fn create_curator(
    State(state): State<AppState>,
    caller: AuthUser,
    Payload(body): Payload<StaffBody>,
) -> Result<Json<UserView>, ApiError> {
    create_staff(&state, &caller, body, Role::Curator).await
}

async fn list_mentors(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<UserView>>, ApiError> {
    list_staff(&state, &caller, Role::Mentor).await
}

async fn list_curators(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<UserView>>, ApiError> {
    list_staff(&state, &caller, Role::Curator).await
}

async fn remove_mentor(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(user_id): PathParams<UserId>,
) -> Result<Json<UserView>, ApiError> {
    remove_staff(&state, &caller, user_id, Role::Mentor).await
}

async fn remove_curator(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(user_id): PathParams<UserId>,
) -> Result<Json<UserView>, ApiError> {
    remove_staff(&state, &caller, user_id, Role::Curator).await
}

async fn students(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<StudentWithStats>>, ApiError> {
    Ok(Json(state.reports.students_with_stats(caller.actor()).await?))
}

async fn pending_students(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<StudentSummary>>, ApiError> {
    caller.actor().require_any(&MANAGEMENT)?;
    let pending = state.accounts.list_pending_students().await?;
    Ok(Json(pending.iter().map(StudentSummary::from).collect()))
}

async fn approve_student(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(user_id): PathParams<UserId>,
) -> Result<Json<UserView>, ApiError> {
    let user = state
        .accounts
        .approve_student(caller.actor(), user_id)
        .await?;
    Ok(Json(UserView::from(user)))
}

async fn reject_student(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(user_id): PathParams<UserId>,
) -> Result<Json<UserView>, ApiError> {
    let user = state.accounts.reject_student(caller.actor(), user_id).await?;
    Ok(Json(UserView::from(user)))
}

async fn student_stats(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(user_id): PathParams<UserId>,
) -> Result<Json<StudentStats>, ApiError> {
    Ok(Json(
        state.reports.student_stats(caller.actor(), user_id).await?,
    ))
}

async fn hr_dashboard(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<HrStudentSummary>>, ApiError> {
    Ok(Json(state.reports.hr_dashboard(caller.actor()).await?))
}
