//! Mentor reviews and the student portfolio.

use crate::assignment::domain::AssignmentId;
use crate::http::{
    error::ApiError,
    extract::{AuthUser, PathParams, Payload},
    state::AppState,
};
use crate::portfolio::services::PortfolioItem;
use crate::review::{domain::Review, services::REVIEWER_ROLES};
use crate::user::domain::{Role, UserId};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ReviewBody {
    assignment_id: AssignmentId,
    rating: i64,
    comment: Option<String>,
}

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(submit))
        .route("/me", get(mine))
        .route("/student/:student_id", get(for_student))
}

pub(super) fn portfolio_routes() -> Router<AppState> {
    Router::new().route("/me", get(my_portfolio))
}

async fn submit(
    State(state): State<AppState>,
    caller: AuthUser,
    Payload(body): Payload<ReviewBody>,
) -> Result<Json<Review>, ApiError> {
    let review = state
        .reviews
        .submit(caller.actor(), body.assignment_id, body.rating, body.comment)
        .await?;
    Ok(Json(review))
}

async fn for_student(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(student_id): PathParams<UserId>,
) -> Result<Json<Vec<Review>>, ApiError> {
    caller.actor().require_any(&REVIEWER_ROLES)?;
    Ok(Json(state.reviews.list_for_student(student_id).await?))
}

async fn mine(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<Review>>, ApiError> {
    let actor = caller.actor();
    actor.require_any(&[Role::Student])?;
    Ok(Json(state.reviews.list_for_student(actor.id).await?))
}

async fn my_portfolio(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<PortfolioItem>>, ApiError> {
    let actor = caller.actor();
    actor.require_any(&[Role::Student])?;
    Ok(Json(state.portfolios.list_for_student(actor.id).await?))
}
