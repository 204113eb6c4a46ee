//! Credit requests: filed by students, decided by university staff.

use crate::Page;
use crate::approval::domain::{Approval, ApprovalId, ApprovalKind, ApprovalState};
use crate::http::{
    error::ApiError,
    extract::{AuthUser, PathParams, Payload, QueryParams},
    state::AppState,
};
use crate::task::domain::TaskId;
use crate::user::domain::Role;
use axum::extract::State;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SubmitBody {
    task_id: TaskId,
    #[serde(rename = "type")]
    kind: ApprovalKind,
    comment: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ResubmitBody {
    comment: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DecisionBody {
    state: ApprovalState,
    comment: Option<String>,
}

pub(super) fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(submit))
        .route("/me", get(mine))
        .route("/:approval_id/resubmit", post(resubmit))
}

pub(super) fn university_routes() -> Router<AppState> {
    Router::new()
        .route("/approvals", get(list_all))
        .route("/approvals/:approval_id", patch(decide))
}

async fn submit(
    State(state): State<AppState>,
    caller: AuthUser,
    Payload(body): Payload<SubmitBody>,
) -> Result<Json<Approval>, ApiError> {
    let approval = state
        .approvals
        .submit(caller.actor(), body.task_id, body.kind, body.comment)
        .await?;
    Ok(Json(approval))
}

async fn mine(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<Approval>>, ApiError> {
    let actor = caller.actor();
    actor.require_any(&[Role::Student])?;
    Ok(Json(state.approvals.list_mine(actor.id).await?))
}

async fn resubmit(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(approval_id): PathParams<ApprovalId>,
    body: Option<Payload<ResubmitBody>>,
) -> Result<Json<Approval>, ApiError> {
    let comment = body.map(|Payload(inner)| inner).unwrap_or_default().comment;
    let approval = state
        .approvals
        .resubmit(caller.actor(), approval_id, comment)
        .await?;
    Ok(Json(approval))
}

async fn list_all(
    State(state): State<AppState>,
    caller: AuthUser,
    QueryParams(page): QueryParams<Page>,
) -> Result<Json<Vec<Approval>>, ApiError> {
    Ok(Json(state.approvals.list_all(caller.actor(), page).await?))
}

async fn decide(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(approval_id): PathParams<ApprovalId>,
    Payload(body): Payload<DecisionBody>,
) -> Result<Json<Approval>, ApiError> {
    let approval = state
        .approvals
        .review(caller.actor(), approval_id, body.state, body.comment)
        .await?;
    Ok(Json(approval))
}
