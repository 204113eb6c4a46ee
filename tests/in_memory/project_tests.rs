//! Listing visibility, applications and credit requests across services.

use super::helpers::{Platform, platform};
use eyre::ensure;
use rstest::rstest;
use sbercollab::approval::{
    domain::{ApprovalKind, ApprovalState},
    services::ApprovalError,
};
use sbercollab::task::{
    domain::{CreditOptions, TaskQuery, Visibility},
    services::{BrowseError, NewTask},
};
use sbercollab::user::domain::{Actor, Role};

fn nda_listing() -> NewTask {
    NewTask {
        nda_required: true,
        ..NewTask::new("Confidential project", "Details under NDA")
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn archived_listings_leave_student_browse(platform: Platform) -> eyre::Result<()> {
    let manager = platform.actor("manager@example.com", Role::Manager).await;
    let student = platform.actor("student@example.com", Role::Student).await;
    let task = platform
        .listing(manager, NewTask::new("Short-lived", "Archived soon"))
        .await;

    let before = platform
        .state
        .browse
        .list_for(student, TaskQuery::default())
        .await?;
    ensure!(
        before.iter().any(|listed| listed.id() == task.id()),
        "open public listings are browsable"
    );

    platform.state.catalog.archive(manager, task.id()).await?;

    let after = platform
        .state
        .browse
        .list_for(student, TaskQuery::default())
        .await?;
    ensure!(
        after.iter().all(|listed| listed.id() != task.id()),
        "archived listings are hidden from students"
    );
    let restored = platform.state.catalog.unarchive(manager, task.id()).await?;
    ensure!(!restored.is_archived(), "unarchiving restores the listing");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn private_listings_are_closed_to_students(platform: Platform) -> eyre::Result<()> {
    let manager = platform.actor("manager@example.com", Role::Manager).await;
    let student = platform.actor("student@example.com", Role::Student).await;
    let task = platform
        .listing(
            manager,
            NewTask {
                visibility: Some(Visibility::Private),
                ..NewTask::new("Internal", "Staff only")
            },
        )
        .await;

    let result = platform.state.browse.view_for(student, task.id()).await;

    ensure!(
        matches!(result, Err(BrowseError::Forbidden(_))),
        "students may not open private listings"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn nda_details_unlock_after_accepting(platform: Platform) -> eyre::Result<()> {
    let manager = platform.actor("manager@example.com", Role::Manager).await;
    let student = platform.actor("student@example.com", Role::Student).await;
    let task = platform.listing(manager, nda_listing()).await;

    let redacted = platform.state.browse.view_for(student, task.id()).await?;
    ensure!(redacted == task.redacted(), "NDA content is hidden at first");

    platform
        .state
        .applications
        .apply(student, task.id(), true)
        .await?;

    let full = platform.state.browse.view_for(student, task.id()).await?;
    ensure!(full == task, "accepting the NDA reveals the listing");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approved_application_joins_the_team(platform: Platform) -> eyre::Result<()> {
    let manager = platform.actor("manager@example.com", Role::Manager).await;
    let student = platform.member("student@example.com", Role::Student).await;
    let task = platform
        .listing(manager, NewTask::new("Team project", "Needs a backend developer"))
        .await;
    let applicant = Actor::from(&student);

    let application = platform
        .state
        .applications
        .apply(applicant, task.id(), false)
        .await?;
    platform
        .state
        .applications
        .approve(manager, application.id())
        .await?;
    platform
        .state
        .applications
        .set_team_role(manager, application.id(), "Backend".to_owned())
        .await?;

    let team = platform.state.teams.team_for(manager, task.id()).await?;
    ensure!(team.len() == 1, "the approved student joins the team");
    let portfolio = platform
        .state
        .portfolios
        .list_for_student(student.id())
        .await?;
    ensure!(portfolio.len() == 1, "approval records a portfolio entry");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn credit_request_goes_back_for_changes(platform: Platform) -> eyre::Result<()> {
    let manager = platform.actor("manager@example.com", Role::Manager).await;
    let student = platform.actor("student@example.com", Role::Student).await;
    let teacher = platform
        .actor("teacher@example.com", Role::UnivTeacher)
        .await;
    let task = platform
        .listing(
            manager,
            NewTask {
                credits: CreditOptions {
                    course_project_possible: true,
                    ..CreditOptions::default()
                },
                ..NewTask::new("Course work", "Counts as a course project")
            },
        )
        .await;

    let refused = platform
        .state
        .approvals
        .submit(student, task.id(), ApprovalKind::Diploma, None)
        .await;
    ensure!(
        matches!(refused, Err(ApprovalError::NotOffered(ApprovalKind::Diploma))),
        "only offered credit kinds can be requested"
    );

    let request = platform
        .state
        .approvals
        .submit(student, task.id(), ApprovalKind::Course, None)
        .await?;
    platform
        .state
        .approvals
        .review(
            teacher,
            request.id(),
            ApprovalState::NeedsChanges,
            Some("Add a timeline".to_owned()),
        )
        .await?;
    let resubmitted = platform
        .state
        .approvals
        .resubmit(student, request.id(), Some("Timeline added".to_owned()))
        .await?;
    ensure!(
        resubmitted.state() == ApprovalState::Submitted,
        "resubmission reopens the request"
    );

    let approved = platform
        .state
        .approvals
        .review(teacher, request.id(), ApprovalState::Approved, None)
        .await?;
    ensure!(approved.reviewer_id().is_some(), "the reviewer is recorded");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_listing_clears_its_history(platform: Platform) -> eyre::Result<()> {
    let manager = platform.actor("manager@example.com", Role::Manager).await;
    let member = platform.member("member@example.com", Role::Student).await;
    let applicant = platform.actor("applicant@example.com", Role::Student).await;
    let task = platform
        .listing(manager, NewTask::new("Retired project", "Removed with its history"))
        .await;

    let joined = platform
        .state
        .applications
        .apply(Actor::from(&member), task.id(), false)
        .await?;
    platform
        .state
        .applications
        .approve(manager, joined.id())
        .await?;
    platform
        .state
        .applications
        .apply(applicant, task.id(), false)
        .await?;

    platform.state.catalog.delete(manager, task.id()).await?;

    let dashboard = platform.state.reports.manager_dashboard(manager).await?;
    ensure!(dashboard.total_projects == 0, "the listing is gone");
    ensure!(
        dashboard.pending_applications == 0,
        "applications go with their listing"
    );
    let portfolio = platform
        .state
        .portfolios
        .list_for_student(member.id())
        .await?;
    ensure!(portfolio.is_empty(), "portfolio entries go with their listing");
    let history = platform
        .state
        .reports
        .student_stats(manager, member.id())
        .await?;
    ensure!(
        history.applications_total == 0,
        "student statistics forget the listing"
    );
    Ok(())
}
