//! Demo data seeding.

use super::helpers::{Platform, platform};
use eyre::{OptionExt, ensure};
use rstest::rstest;
use sbercollab::Page;
use sbercollab::assignment::domain::AssignmentState;
use sbercollab::seed::{DEMO_PASSWORD, seed_demo_data};
use sbercollab::task::domain::TaskQuery;
use sbercollab::user::domain::Role;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn seeding_runs_once(platform: Platform) -> eyre::Result<()> {
    let first = seed_demo_data(&platform.state, &platform.repos).await?;
    let second = seed_demo_data(&platform.state, &platform.repos).await?;

    ensure!(first, "the first run should create the demo project");
    ensure!(!second, "the second run should find the catalogue populated");

    let listings = platform.state.catalog.list(TaskQuery::default()).await?;
    ensure!(listings.len() == 1, "exactly one demo project expected");
    let users = platform.state.accounts.list_users(Page::default()).await?;
    ensure!(users.len() == 5, "one account per demo role expected");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn demo_project_has_application_and_credit_request(platform: Platform) -> eyre::Result<()> {
    seed_demo_data(&platform.state, &platform.repos).await?;
    let students = platform
        .state
        .accounts
        .list_active_by_role(Role::Student)
        .await?;
    let student = students.first().ok_or_eyre("demo student missing")?;
    let task = platform
        .state
        .catalog
        .list(TaskQuery::default())
        .await?
        .into_iter()
        .next()
        .ok_or_eyre("demo project missing")?;

    ensure!(task.nda_required(), "the demo project is under NDA");
    let applications = platform.state.applications.list_for_task(task.id()).await?;
    let application = applications
        .first()
        .ok_or_eyre("demo application missing")?;
    ensure!(
        application.student_id() == student.id(),
        "the demo student applied"
    );
    ensure!(
        application.state() == AssignmentState::Requested,
        "the demo application awaits a decision"
    );
    ensure!(application.nda_accepted(), "the demo student accepted the NDA");

    let requests = platform.state.approvals.list_mine(student.id()).await?;
    ensure!(requests.len() == 1, "one diploma request expected");
    Ok(())
}

#[rstest]
#[case("manager@sbercollab.local")]
#[case("student@sbercollab.local")]
#[case("hr@sbercollab.local")]
#[tokio::test(flavor = "multi_thread")]
async fn seeded_accounts_can_sign_in(platform: Platform, #[case] email: &str) -> eyre::Result<()> {
    seed_demo_data(&platform.state, &platform.repos).await?;

    let pair = platform.state.sessions.login(email, DEMO_PASSWORD).await?;

    ensure!(pair.token_type == "bearer", "bearer tokens expected");
    Ok(())
}
