//! Router tests driven through `tower::ServiceExt::oneshot`.

mod workflow_tests;

use crate::config::AppConfig;
use crate::http::{AppState, Repositories, router};
use crate::user::{domain::Role, services::CreateMemberRequest};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use rstest::fixture;
use serde_json::Value;
use std::collections::HashMap;
use tower::ServiceExt;

pub(super) const PASSWORD: &str = "changeme123";

pub(super) struct TestApp {
    pub(super) app: Router,
    pub(super) state: AppState,
}

#[fixture]
pub(super) fn test_app() -> TestApp {
    let vars: HashMap<String, String> = [
        ("SECRET_KEY", "router-test-secret-key"),
        ("APP_NAME", "CollabTest"),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_owned(), value.to_owned()))
    .collect();
    let config = AppConfig::from_map(&vars).expect("test config should load");
    let state = AppState::new(&config, &Repositories::in_memory());
    TestApp {
        app: router(state.clone(), &config),
        state,
    }
}

impl TestApp {
    pub(super) async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body should be JSON")
        };
        (status, body)
    }

    /// Creates an active account and signs it in, returning the access token.
    pub(super) async fn sign_in_as(&self, email: &str, role: Role) -> String {
        self.state
            .accounts
            .create_member(CreateMemberRequest::new(email, "Test Member", PASSWORD, role))
            .await
            .expect("member should be created");
        let (status, body) = self
            .send(json_request(
                Method::POST,
                "/api/v1/auth/login",
                None,
                &serde_json::json!({ "email": email, "password": PASSWORD }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body.get("access_token")
            .and_then(Value::as_str)
            .expect("access token should be a string")
            .to_owned()
    }
}

pub(super) fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: &Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(bearer) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {bearer}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

pub(super) fn detail(body: &Value) -> Option<&str> {
    body.get("detail").and_then(Value::as_str)
}

pub(super) fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(bearer) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {bearer}"));
    }
    builder.body(Body::empty()).expect("request should build")
}
