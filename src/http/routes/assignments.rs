//! Applications seen from the applicant and from project staff.

use crate::Page;
use crate::assignment::{
    domain::{Assignment, AssignmentId, AssignmentState},
    services::APPLICANT_ROLES,
};
use crate::http::{
    error::ApiError,
    extract::{AuthUser, PathParams, Payload, QueryParams},
    state::AppState,
};
use crate::task::domain::TaskId;
use axum::extract::State;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CreateBody {
    task_id: TaskId,
    #[serde(default)]
    nda_accepted: bool,
}

#[derive(Debug, Deserialize)]
struct StateBody {
    state: AssignmentState,
}

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_assignment))
        .route("/me", get(my_assignments))
        .route("/:assignment_id", patch(update_assignment))
}

async fn create_assignment(
    State(state): State<AppState>,
    caller: AuthUser,
    Payload(body): Payload<CreateBody>,
) -> Result<Json<Assignment>, ApiError> {
    let assignment = state
        .applications
        .apply(caller.actor(), body.task_id, body.nda_accepted)
        .await?;
    Ok(Json(assignment))
}

async fn my_assignments(
    State(state): State<AppState>,
    caller: AuthUser,
    QueryParams(page): QueryParams<Page>,
) -> Result<Json<Vec<Assignment>>, ApiError> {
    let actor = caller.actor();
    actor.require_any(&APPLICANT_ROLES)?;
    Ok(Json(
        state.applications.list_for_student(actor.id, page).await?,
    ))
}

async fn update_assignment(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(assignment_id): PathParams<AssignmentId>,
    Payload(body): Payload<StateBody>,
) -> Result<Json<Assignment>, ApiError> {
    let assignment = state
        .applications
        .update_state(caller.actor(), assignment_id, body.state)
        .await?;
    Ok(Json(assignment))
}
