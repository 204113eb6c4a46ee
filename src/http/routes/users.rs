//! Account listing, self-service profile edits and role changes.

use crate::Page;
use crate::http::{
    error::ApiError,
    extract::{AuthUser, PathParams, Payload, QueryParams},
    state::AppState,
    views::{self, UserView},
};
use crate::user::domain::{Role, UserId, UserProfile};
use crate::user::services::ProfileUpdate;
use axum::extract::State;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Deserialize;

/// Roles allowed to browse every account.
const DIRECTORY_VIEWERS: [Role; 2] = [Role::Admin, Role::Curator];

#[derive(Debug, Deserialize)]
struct ProfileBody {
    full_name: Option<String>,
    #[serde(flatten)]
    profile: UserProfile,
}

#[derive(Debug, Deserialize)]
struct RoleBody {
    role: Role,
}

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/me", patch(update_me))
        .route("/:user_id/role", patch(change_role))
}

async fn list_users(
    State(state): State<AppState>,
    caller: AuthUser,
    QueryParams(page): QueryParams<Page>,
) -> Result<Json<Vec<UserView>>, ApiError> {
    caller.actor().require_any(&DIRECTORY_VIEWERS)?;
    let users = state.accounts.list_users(page).await?;
    Ok(Json(views::users(&users)))
}

async fn update_me(
    State(state): State<AppState>,
    caller: AuthUser,
    Payload(body): Payload<ProfileBody>,
) -> Result<Json<UserView>, ApiError> {
    let update = ProfileUpdate {
        full_name: body.full_name,
        profile: body.profile,
    };
    let user = state.accounts.update_profile(caller.actor(), update).await?;
    Ok(Json(UserView::from(user)))
}

async fn change_role(
    State(state): State<AppState>,
    caller: AuthUser,
    PathParams(user_id): PathParams<UserId>,
    Payload(body): Payload<RoleBody>,
) -> Result<Json<UserView>, ApiError> {
    let user = state
        .accounts
        .change_role(caller.actor(), user_id, body.role)
        .await?;
    Ok(Json(UserView::from(user)))
}
