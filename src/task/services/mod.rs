//! Application services for project listings.

mod browse;
mod catalog;
mod mentors;

pub use browse::{BrowseError, ProjectBrowseService};
pub use catalog::{
    NewTask, TASK_ARCHIVERS, TASK_EDITORS, TaskCatalogError, TaskCatalogResult,
    TaskCatalogService, TaskPatch,
};
pub use mentors::{LinkedMentor, TaskMentorError, TaskMentorResult, TaskMentorService};
