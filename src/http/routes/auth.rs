//! Registration, sign-in and token refresh.

use super::acknowledged;
use crate::auth::domain::TokenPair;
use crate::http::{
    error::ApiError,
    extract::{AuthUser, Payload},
    state::AppState,
    views::UserView,
};
use crate::user::services::RegisterRequest;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct RegisterBody {
    email: String,
    full_name: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct RefreshBody {
    token: String,
}

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

async fn register(
    State(state): State<AppState>,
    Payload(body): Payload<RegisterBody>,
) -> Result<Json<UserView>, ApiError> {
    let request = RegisterRequest::new(body.email, body.full_name, body.password);
    let user = state.accounts.register(request).await?;
    Ok(Json(UserView::from(user)))
}

async fn login(
    State(state): State<AppState>,
    Payload(body): Payload<LoginBody>,
) -> Result<Json<TokenPair>, ApiError> {
    Ok(Json(state.sessions.login(&body.email, &body.password).await?))
}

async fn refresh(
    State(state): State<AppState>,
    Payload(body): Payload<RefreshBody>,
) -> Result<Json<TokenPair>, ApiError> {
    Ok(Json(state.sessions.refresh(&body.token).await?))
}

#[expect(clippy::unused_async, reason = "axum handlers are async functions")]
async fn logout(State(state): State<AppState>) -> Json<Value> {
    acknowledged(state.sessions.logout())
}

#[expect(clippy::unused_async, reason = "axum handlers are async functions")]
async fn me(AuthUser(user): AuthUser) -> Json<UserView> {
    Json(UserView::from(user))
}
