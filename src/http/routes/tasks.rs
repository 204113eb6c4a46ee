//! Listing management for curators and managers.

use super::acknowledged;
use crate::http::{
    error::ApiError,
    extract::{AuthUser, PathParams, Payload, QueryParams},
    state::AppState,
};
use crate::task::domain::{Task, TaskId, TaskQuery};
use crate::task::services::{NewTask, TaskPatch};
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route(
            "/:task_id",
            get(get_task).patch(update_task).delete(delete_task),
        )
}

async fn create_task(
    State(state): State<AppState>,
    caller: AuthUser,
    Payload(body): Payload<NewTask>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(state.catalog.create(caller.actor(), body).await?))
}

async fn list_tasks(
    State(state): State<AppState>,
    _caller: AuthUser,
    QueryParams(query): QueryParams<TaskQuery>,
) -> Result<Json<Vec<Task>>, ApiError> {
    Ok(Json(state.catalog.list(query).await?))
}

async fn get_task(
    State(state): State<AppState>,
    _caller: AuthUser,
    PathParams(task_id): PathParams<TaskId>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(state.catalog.find(task_id).await?))
}

async fn update_task(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(task_id): PathParams<TaskId>,
    Payload(body): Payload<TaskPatch>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(
        state.catalog.update(caller.actor(), task_id, body).await?,
    ))
}

async fn delete_task(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(task_id): PathParams<TaskId>,
) -> Result<Json<Value>, ApiError> {
    state.catalog.delete(caller.actor(), task_id).await?;
    Ok(acknowledged("Task deleted"))
}
