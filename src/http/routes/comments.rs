//! Project comments and questions.

use super::acknowledged;
use crate::Page;
use crate::comment::{
    domain::{Comment, CommentBody, CommentId, CommentPatch, NewComment},
    services::DiscussionError,
};
use crate::http::{
    error::ApiError,
    extract::{AuthUser, PathParams, Payload, QueryParams},
    state::AppState,
};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use axum::extract::State;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct PostBody {
    task_id: TaskId,
    body: String,
    #[serde(default)]
    is_private: bool,
    recipient_id: Option<UserId>,
    meeting_info: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EditBody {
    body: String,
    is_private: Option<bool>,
    recipient_id: Option<UserId>,
    meeting_info: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ThreadQuery {
    task_id: TaskId,
    #[serde(default)]
    skip: usize,
    #[serde(default = "default_limit")]
    limit: usize,
}

const fn default_limit() -> usize {
    50
}

impl ThreadQuery {
    const fn page(&self) -> Page {
        Page::new(self.skip, self.limit)
    }
}

fn body_of(raw: String) -> Result<CommentBody, ApiError> {
    Ok(CommentBody::new(raw).map_err(DiscussionError::from)?)
}

pub(super) fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_comments).post(post_comment))
        .route("/:comment_id", patch(edit_entry).delete(delete_entry))
}

pub(super) fn question_routes() -> Router<AppState> {
    Router::new().route("/", get(list_questions).post(post_question))
}

async fn post_comment(
    State(state): State<AppState>,
    caller: AuthUser,
    Payload(body): Payload<PostBody>,
) -> Result<Json<Comment>, ApiError> {
    let comment = state
        .discussion
        .post_comment(caller.actor(), body.task_id, body.body)
        .await?;
    Ok(Json(comment))
}

async fn list_comments(
    State(state): State<AppState>,
    caller: AuthUser,
    QueryParams(query): QueryParams<ThreadQuery>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let comments = state
        .discussion
        .list_comments(caller.actor(), query.task_id, query.page())
        .await?;
    Ok(Json(comments))
}

async fn post_question(
    State(state): State<AppState>,
    caller: AuthUser,
    Payload(body): Payload<PostBody>,
) -> Result<Json<Comment>, ApiError> {
    let content = NewComment {
        body: body_of(body.body)?,
        is_private: body.is_private,
        recipient_id: body.recipient_id,
        meeting_info: body.meeting_info,
    };
    let question = state
        .discussion
        .post_question(caller.actor(), body.task_id, content)
        .await?;
    Ok(Json(question))
}

async fn list_questions(
    State(state): State<AppState>,
    caller: AuthUser,
    QueryParams(query): QueryParams<ThreadQuery>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let questions = state
        .discussion
        .list_questions(caller.actor(), query.task_id, query.page())
        .await?;
    Ok(Json(questions))
}

async fn edit_entry(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(comment_id): PathParams<CommentId>,
    Payload(body): Payload<EditBody>,
) -> Result<Json<Comment>, ApiError> {
    let patch = CommentPatch {
        body: body_of(body.body)?,
        is_private: body.is_private,
        recipient_id: body.recipient_id,
        meeting_info: body.meeting_info,
    };
    let comment = state
        .discussion
        .edit(caller.actor(), comment_id, patch)
        .await?;
    Ok(Json(comment))
}

async fn delete_entry(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(comment_id): PathParams<CommentId>,
) -> Result<Json<Value>, ApiError> {
    state.discussion.delete(caller.actor(), comment_id).await?;
    Ok(acknowledged("Comment deleted"))
}
