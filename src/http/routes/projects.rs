//! Role-scoped project browsing, team rosters and applying.

use crate::assignment::{domain::Assignment, services::TeamMember};
use crate::http::{
    error::ApiError,
    extract::{AuthUser, PathParams, Payload, QueryParams},
    state::AppState,
};
use crate::task::domain::{Task, TaskId, TaskQuery};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct ApplyBody {
    #[serde(default)]
    nda_accepted: bool,
}

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects))
        .route("/:project_id", get(get_project))
        .route("/:project_id/team", get(project_team))
        .route("/:project_id/applications", post(apply))
}

async fn list_projects(
    State(state): State<AppState>,
    caller: AuthUser,
    QueryParams(query): QueryParams<TaskQuery>,
) -> Result<Json<Vec<Task>>, ApiError> {
    Ok(Json(state.browse.list_for(caller.actor(), query).await?))
}

async fn get_project(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(project_id): PathParams<TaskId>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(state.browse.view_for(caller.actor(), project_id).await?))
}

async fn project_team(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(project_id): PathParams<TaskId>,
) -> Result<Json<Vec<TeamMember>>, ApiError> {
    Ok(Json(state.teams.team_for(caller.actor(), project_id).await?))
}

async fn apply(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(project_id): PathParams<TaskId>,
    body: Option<Payload<ApplyBody>>,
) -> Result<Json<Assignment>, ApiError> {
    let ApplyBody { nda_accepted } = body.map(|Payload(inner)| inner).unwrap_or_default();
    let assignment = state
        .applications
        .apply(caller.actor(), project_id, nda_accepted)
        .await?;
    Ok(Json(assignment))
}
