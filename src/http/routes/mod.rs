//! Router assembly.

mod approvals;
mod assignments;
mod auth;
mod comments;
mod manager;
mod projects;
mod reviews;
mod tasks;
mod users;

use super::state::AppState;
use crate::config::AppConfig;
use axum::http::HeaderValue;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Builds the application router.
///
/// The versioned API is nested under `config.api_prefix`; `/health` stays at
/// the root.
#[must_use]
pub fn router(state: AppState, config: &AppConfig) -> Router {
    let api = Router::new()
        .nest("/auth", auth::routes())
        .nest("/users", users::routes())
        .nest("/tasks", tasks::routes())
        .nest("/projects", projects::routes())
        .nest("/assignments", assignments::routes())
        .nest("/comments", comments::comment_routes())
        .nest("/questions", comments::question_routes())
        .nest("/manager", manager::routes())
        .nest("/approvals", approvals::student_routes())
        .nest("/univ", approvals::university_routes())
        .nest("/reviews", reviews::routes())
        .nest("/portfolio", reviews::portfolio_routes())
        .nest("/hr", manager::hr_routes());

    Router::new()
        .route("/health", get(health))
        .nest(&config.api_prefix, api)
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[expect(clippy::unused_async, reason = "axum handlers are async functions")]
async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "status": "ok", "app": &*state.app_name }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(%origin, %err, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Body returned by endpoints that only acknowledge an action.
fn acknowledged(detail: &str) -> Json<Value> {
    Json(json!({ "detail": detail }))
}
