//! End-to-end project workflow across roles.

use super::{TestApp, detail, get_request, json_request, test_app};
use crate::user::domain::Role;
use axum::http::{Method, StatusCode};
use eyre::{OptionExt, ensure};
use rstest::rstest;
use serde_json::{Value, json};

fn id_of(body: &Value) -> eyre::Result<String> {
    body.get("id")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_eyre("response carries no id")
}

async fn create_project(
    test_app: &TestApp,
    token: &str,
    nda_required: bool,
) -> eyre::Result<String> {
    let (status, task) = test_app
        .send(json_request(
            Method::POST,
            "/api/v1/manager/projects",
            Some(token),
            &json!({
                "title": "Router project",
                "description": "Exercised over HTTP",
                "nda_required": nda_required,
                "diploma_possible": true,
            }),
        ))
        .await;
    ensure!(status == StatusCode::OK, "project creation failed: {task}");
    id_of(&task)
}

#[rstest]
#[case(Role::Student)]
#[case(Role::Mentor)]
#[case(Role::UnivTeacher)]
#[tokio::test(flavor = "multi_thread")]
async fn manager_dashboard_is_forbidden_to_other_roles(test_app: TestApp, #[case] role: Role) {
    let token = test_app.sign_in_as("someone@example.com", role).await;

    let (status, body) = test_app
        .send(get_request("/api/v1/manager/dashboard", Some(&token)))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(detail(&body), Some("Not enough permissions"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_project_is_not_found(test_app: TestApp) {
    let token = test_app.sign_in_as("manager@example.com", Role::Manager).await;

    let (status, body) = test_app
        .send(get_request(
            "/api/v1/tasks/00000000-0000-4000-8000-000000000000",
            Some(&token),
        ))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.get("error"), Some(&Value::Bool(true)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn nda_projects_need_acceptance(test_app: TestApp) -> eyre::Result<()> {
    let manager = test_app.sign_in_as("manager@example.com", Role::Manager).await;
    let student = test_app.sign_in_as("student@example.com", Role::Student).await;
    let project = create_project(&test_app, &manager, true).await?;
    let uri = format!("/api/v1/projects/{project}/applications");

    let (status, _) = test_app
        .send(json_request(Method::POST, &uri, Some(&student), &json!({})))
        .await;
    ensure!(status == StatusCode::FORBIDDEN, "NDA should gate applications");

    let (status, body) = test_app
        .send(json_request(
            Method::POST,
            &uri,
            Some(&student),
            &json!({ "nda_accepted": true }),
        ))
        .await;
    ensure!(status == StatusCode::OK, "application failed: {body}");
    ensure!(body.get("state") == Some(&json!("requested")), "state: {body}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn application_review_and_portfolio(test_app: TestApp) -> eyre::Result<()> {
    let manager = test_app.sign_in_as("manager@example.com", Role::Manager).await;
    let mentor = test_app.sign_in_as("mentor@example.com", Role::Mentor).await;
    let student = test_app.sign_in_as("student@example.com", Role::Student).await;
    let project = create_project(&test_app, &manager, false).await?;

    let (status, application) = test_app
        .send(json_request(
            Method::POST,
            &format!("/api/v1/projects/{project}/applications"),
            Some(&student),
            &json!({}),
        ))
        .await;
    ensure!(status == StatusCode::OK, "application failed: {application}");
    let application_id = id_of(&application)?;

    let (status, rows) = test_app
        .send(get_request(
            &format!("/api/v1/manager/projects/{project}/applications"),
            Some(&manager),
        ))
        .await;
    ensure!(status == StatusCode::OK, "listing failed: {rows}");
    let applicant = rows
        .as_array()
        .and_then(|list| list.first())
        .and_then(|row| row.get("student"))
        .and_then(|student_view| student_view.get("email"))
        .ok_or_eyre("application row carries no student")?;
    ensure!(applicant == &json!("student@example.com"), "applicant: {applicant}");

    let (status, approved) = test_app
        .send(json_request(
            Method::POST,
            &format!("/api/v1/manager/applications/{application_id}/approve"),
            Some(&manager),
            &json!({}),
        ))
        .await;
    ensure!(status == StatusCode::OK, "approval failed: {approved}");
    ensure!(approved.get("state") == Some(&json!("active")), "state: {approved}");

    let (status, review) = test_app
        .send(json_request(
            Method::POST,
            "/api/v1/reviews",
            Some(&mentor),
            &json!({ "assignment_id": application_id, "rating": 5, "comment": "Great work" }),
        ))
        .await;
    ensure!(status == StatusCode::OK, "review failed: {review}");

    let (status, portfolio) = test_app
        .send(get_request("/api/v1/portfolio/me", Some(&student)))
        .await;
    ensure!(status == StatusCode::OK, "portfolio failed: {portfolio}");
    let entry = portfolio
        .as_array()
        .and_then(|list| list.first())
        .ok_or_eyre("portfolio should hold the approved project")?;
    ensure!(entry.get("rating") == Some(&json!(5)), "entry: {entry}");
    ensure!(
        entry.get("review_comment") == Some(&json!("Great work")),
        "entry: {entry}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn credit_request_round_trip(test_app: TestApp) -> eyre::Result<()> {
    let manager = test_app.sign_in_as("manager@example.com", Role::Manager).await;
    let teacher = test_app.sign_in_as("teacher@example.com", Role::UnivTeacher).await;
    let student = test_app.sign_in_as("student@example.com", Role::Student).await;
    let project = create_project(&test_app, &manager, false).await?;

    let (status, offered) = test_app
        .send(json_request(
            Method::POST,
            "/api/v1/approvals",
            Some(&student),
            &json!({ "task_id": project, "type": "practice" }),
        ))
        .await;
    ensure!(status == StatusCode::BAD_REQUEST, "practice is not offered: {offered}");

    let (status, filed) = test_app
        .send(json_request(
            Method::POST,
            "/api/v1/approvals",
            Some(&student),
            &json!({ "task_id": project, "type": "diploma", "comment": "Thesis topic" }),
        ))
        .await;
    ensure!(status == StatusCode::OK, "request failed: {filed}");
    let approval_id = id_of(&filed)?;

    let (status, decided) = test_app
        .send(json_request(
            Method::PATCH,
            &format!("/api/v1/univ/approvals/{approval_id}"),
            Some(&teacher),
            &json!({ "state": "approved" }),
        ))
        .await;
    ensure!(status == StatusCode::OK, "decision failed: {decided}");
    ensure!(decided.get("state") == Some(&json!("approved")), "state: {decided}");

    let (status, mine) = test_app
        .send(get_request("/api/v1/approvals/me", Some(&student)))
        .await;
    ensure!(status == StatusCode::OK, "listing failed: {mine}");
    ensure!(
        mine.as_array().map(Vec::len) == Some(1),
        "student should see one request: {mine}"
    );
    Ok(())
}
