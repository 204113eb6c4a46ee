//! Shared handler state: one instance of every service.

use crate::approval::{
    adapters::{memory::InMemoryApprovalRepository, postgres::PostgresApprovalRepository},
    ports::ApprovalRepository,
    services::ApprovalService,
};
use crate::assignment::{
    adapters::{memory::InMemoryAssignmentRepository, postgres::PostgresAssignmentRepository},
    ports::AssignmentRepository,
    services::{ApplicationService, TeamService},
};
use crate::audit::{
    adapters::{memory::InMemoryAuditRepository, postgres::PostgresAuditRepository},
    ports::AuditRepository,
};
use crate::auth::{domain::TokenCodec, services::AuthService};
use crate::comment::{
    adapters::{memory::InMemoryCommentRepository, postgres::PostgresCommentRepository},
    ports::CommentRepository,
    services::DiscussionService,
};
use crate::config::AppConfig;
use crate::db::PgPool;
use crate::portfolio::{
    adapters::{memory::InMemoryPortfolioRepository, postgres::PostgresPortfolioRepository},
    ports::PortfolioRepository,
    services::PortfolioService,
};
use crate::reporting::services::ReportingService;
use crate::review::{
    adapters::{memory::InMemoryReviewRepository, postgres::PostgresReviewRepository},
    ports::ReviewRepository,
    services::ReviewService,
};
use crate::task::{
    adapters::{
        memory::InMemoryTaskRepository,
        postgres::{PostgresTaskMentorRepository, PostgresTaskRepository},
    },
    ports::{TaskDependents, TaskMentorRepository, TaskRepository},
    services::{ProjectBrowseService, TaskCatalogService, TaskMentorService},
};
use crate::user::{
    adapters::{memory::InMemoryUserRepository, postgres::PostgresUserRepository},
    ports::UserRepository,
    services::AccountService,
};
use mockable::DefaultClock;
use std::sync::Arc;

type Users = dyn UserRepository;
type Tasks = dyn TaskRepository;
type Mentors = dyn TaskMentorRepository;
type Assignments = dyn AssignmentRepository;
type Reviews = dyn ReviewRepository;
type Approvals = dyn ApprovalRepository;
type Portfolio = dyn PortfolioRepository;
type Comments = dyn CommentRepository;
type Audit = dyn AuditRepository;

/// Account service over trait-object ports.
pub type Accounts = AccountService<Users, Audit, DefaultClock>;
/// Sign-in service over trait-object ports.
pub type Sessions = AuthService<Users, Audit, DefaultClock>;
/// Listing management over trait-object ports.
pub type Catalog = TaskCatalogService<Tasks, DefaultClock>;
/// Role-scoped browsing over trait-object ports.
pub type Browse = ProjectBrowseService<Tasks, Mentors, Assignments>;
/// Mentor links over trait-object ports.
pub type MentorLinks = TaskMentorService<Tasks, Mentors, Users>;
/// Applications over trait-object ports.
pub type Applications = ApplicationService<Assignments, Tasks, Portfolio, Audit, DefaultClock>;
/// Team rosters over trait-object ports.
pub type Teams = TeamService<Assignments, Tasks, Users>;
/// Reviews over trait-object ports.
pub type ReviewDesk = ReviewService<Reviews, Assignments, Audit, DefaultClock>;
/// Credit requests over trait-object ports.
pub type ApprovalDesk = ApprovalService<Approvals, Tasks, Audit, DefaultClock>;
/// Portfolio listing over trait-object ports.
pub type Portfolios = PortfolioService<Portfolio, Reviews>;
/// Comments and questions over trait-object ports.
pub type Discussion = DiscussionService<Comments, Tasks, Assignments, DefaultClock>;
/// Dashboards over trait-object ports.
pub type Reports = ReportingService<Users, Tasks, Assignments, Reviews>;

/// One handle per port, shared by every service.
#[derive(Clone)]
pub struct Repositories {
    /// Accounts.
    pub users: Arc<Users>,
    /// Listings.
    pub tasks: Arc<Tasks>,
    /// Listing mentor links.
    pub mentors: Arc<Mentors>,
    /// Applications.
    pub assignments: Arc<Assignments>,
    /// Reviews.
    pub reviews: Arc<Reviews>,
    /// Credit requests.
    pub approvals: Arc<Approvals>,
    /// Portfolio entries.
    pub portfolio: Arc<Portfolio>,
    /// Comments and questions.
    pub comments: Arc<Comments>,
    /// Audit trail.
    pub audit: Arc<Audit>,
    /// Stores cleared when a listing is deleted.
    pub task_dependents: Vec<Arc<dyn TaskDependents>>,
}

impl Repositories {
    /// Builds process-local adapters.
    #[must_use]
    pub fn in_memory() -> Self {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let assignments = Arc::new(InMemoryAssignmentRepository::new());
        let reviews = Arc::new(InMemoryReviewRepository::new());
        let approvals = Arc::new(InMemoryApprovalRepository::new());
        let portfolio = Arc::new(InMemoryPortfolioRepository::new());
        let comments = Arc::new(InMemoryCommentRepository::new());
        let task_dependents: Vec<Arc<dyn TaskDependents>> = vec![
            Arc::clone(&assignments) as Arc<dyn TaskDependents>,
            Arc::clone(&reviews) as Arc<dyn TaskDependents>,
            Arc::clone(&approvals) as Arc<dyn TaskDependents>,
            Arc::clone(&portfolio) as Arc<dyn TaskDependents>,
            Arc::clone(&comments) as Arc<dyn TaskDependents>,
        ];
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            tasks: Arc::clone(&tasks) as Arc<Tasks>,
            mentors: tasks,
            assignments,
            reviews,
            approvals,
            portfolio,
            comments,
            audit: Arc::new(InMemoryAuditRepository::new()),
            task_dependents,
        }
    }

    /// Builds `PostgreSQL` adapters sharing one pool.
    ///
    /// Dependent rows go with their listing through `ON DELETE CASCADE`.
    #[must_use]
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            tasks: Arc::new(PostgresTaskRepository::new(pool.clone())),
            mentors: Arc::new(PostgresTaskMentorRepository::new(pool.clone())),
            assignments: Arc::new(PostgresAssignmentRepository::new(pool.clone())),
            reviews: Arc::new(PostgresReviewRepository::new(pool.clone())),
            approvals: Arc::new(PostgresApprovalRepository::new(pool.clone())),
            portfolio: Arc::new(PostgresPortfolioRepository::new(pool.clone())),
            comments: Arc::new(PostgresCommentRepository::new(pool.clone())),
            audit: Arc::new(PostgresAuditRepository::new(pool.clone())),
            task_dependents: Vec::new(),
        }
    }
}

/// State cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Name reported by the health endpoint.
    pub app_name: Arc<str>,
    /// Accounts and staff management.
    pub accounts: Arc<Accounts>,
    /// Sign-in and token verification.
    pub sessions: Arc<Sessions>,
    /// Listing management.
    pub catalog: Arc<Catalog>,
    /// Role-scoped browsing.
    pub browse: Arc<Browse>,
    /// Listing mentor links.
    pub mentor_links: Arc<MentorLinks>,
    /// Applications.
    pub applications: Arc<Applications>,
    /// Team rosters.
    pub teams: Arc<Teams>,
    /// Reviews.
    pub reviews: Arc<ReviewDesk>,
    /// Credit requests.
    pub approvals: Arc<ApprovalDesk>,
    /// Portfolios.
    pub portfolios: Arc<Portfolios>,
    /// Comments and questions.
    pub discussion: Arc<Discussion>,
    /// Dashboards.
    pub reports: Arc<Reports>,
}

impl AppState {
    /// Wires every service over the given repositories.
    #[must_use]
    pub fn new(config: &AppConfig, repos: &Repositories) -> Self {
        let clock = Arc::new(DefaultClock);
        let codec = TokenCodec::new(
            config.secret_key.as_bytes(),
            config.access_token_ttl,
            config.refresh_token_ttl,
        );
        Self {
            app_name: Arc::from(config.app_name.as_str()),
            accounts: Arc::new(AccountService::new(
                Arc::clone(&repos.users),
                Arc::clone(&repos.audit),
                Arc::clone(&clock),
            )),
            sessions: Arc::new(AuthService::new(
                Arc::clone(&repos.users),
                Arc::clone(&repos.audit),
                codec,
                Arc::clone(&clock),
            )),
            catalog: Arc::new(
                TaskCatalogService::new(Arc::clone(&repos.tasks), Arc::clone(&clock))
                    .with_dependents(repos.task_dependents.clone()),
            ),
            browse: Arc::new(ProjectBrowseService::new(
                Arc::clone(&repos.tasks),
                Arc::clone(&repos.mentors),
                Arc::clone(&repos.assignments),
            )),
            mentor_links: Arc::new(TaskMentorService::new(
                Arc::clone(&repos.tasks),
                Arc::clone(&repos.mentors),
                Arc::clone(&repos.users),
            )),
            applications: Arc::new(ApplicationService::new(
                Arc::clone(&repos.assignments),
                Arc::clone(&repos.tasks),
                Arc::clone(&repos.portfolio),
                Arc::clone(&repos.audit),
                Arc::clone(&clock),
            )),
            teams: Arc::new(TeamService::new(
                Arc::clone(&repos.assignments),
                Arc::clone(&repos.tasks),
                Arc::clone(&repos.users),
            )),
            reviews: Arc::new(ReviewService::new(
                Arc::clone(&repos.reviews),
                Arc::clone(&repos.assignments),
                Arc::clone(&repos.audit),
                Arc::clone(&clock),
            )),
            approvals: Arc::new(ApprovalService::new(
                Arc::clone(&repos.approvals),
                Arc::clone(&repos.tasks),
                Arc::clone(&repos.audit),
                Arc::clone(&clock),
            )),
            portfolios: Arc::new(PortfolioService::new(
                Arc::clone(&repos.portfolio),
                Arc::clone(&repos.reviews),
            )),
            discussion: Arc::new(DiscussionService::new(
                Arc::clone(&repos.comments),
                Arc::clone(&repos.tasks),
                Arc::clone(&repos.assignments),
                Arc::clone(&clock),
            )),
            reports: Arc::new(ReportingService::new(
                Arc::clone(&repos.users),
                Arc::clone(&repos.tasks),
                Arc::clone(&repos.assignments),
                Arc::clone(&repos.reviews),
            )),
        }
    }
}
