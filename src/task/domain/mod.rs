//! Domain model for project listings.
//!
//! A listing carries its content, credit options, NDA flag and status.
//! Archiving closes a listing and hides it from students; unarchiving
//! reopens it.

mod error;
mod fields;
mod ids;
mod mentor;
mod query;
mod status;
mod task;

pub use error::{ParseTaskValueError, TaskDomainError};
pub use fields::{CreditOptions, Tags, TaskDescription, TaskDetails, TaskTitle};
pub use ids::{TaskId, TaskMentorLinkId};
pub use mentor::TaskMentorLink;
pub use query::{TaskFilter, TaskQuery, TaskScope};
pub use status::{TaskStatus, Visibility};
pub use task::{PersistedTaskData, Task, TaskChanges, TaskDraft};
