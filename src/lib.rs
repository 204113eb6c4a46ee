//! SberCollab: role-based project collaboration platform.
//!
//! This crate connects students, mentors, curators and administrative roles
//! (managers, HR, university staff) around project listings ("tasks"),
//! student applications ("assignments"), mentor reviews, academic credit
//! approvals and generated portfolio entries.
//!
//! # Architecture
//!
//! SberCollab follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic and state machines with no
//!   infrastructure dependencies
//! - **Ports**: Abstract repository traits
//! - **Adapters**: In-memory and `PostgreSQL` implementations of ports
//! - **Services**: Orchestration over ports, generic over a clock
//!
//! # Modules
//!
//! - [`user`]: Accounts, roles and account status
//! - [`auth`]: Password hashing, token issuance and verification
//! - [`task`]: Project listings, mentor links and role-scoped browsing
//! - [`assignment`]: Student applications and their lifecycle
//! - [`review`]: Mentor ratings of finished assignments
//! - [`approval`]: Diploma, practice and course credit requests
//! - [`portfolio`]: Generated portfolio entries
//! - [`comment`]: Project discussion and questions
//! - [`audit`]: Action trail
//! - [`reporting`]: Dashboards and student statistics
//! - [`http`]: REST surface built on axum

pub mod approval;
pub mod assignment;
pub mod audit;
pub mod auth;
pub mod comment;
pub mod config;
pub mod db;
pub mod http;
pub mod portfolio;
pub mod reporting;
pub mod review;
pub mod seed;
pub mod task;
pub mod user;

mod paging;

pub use paging::Page;
