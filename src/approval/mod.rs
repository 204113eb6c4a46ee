//! Academic credit requests ("approvals").
//!
//! Students ask for a project to count as diploma, practice or course work.
//! University reviewers approve, reject or send the request back for
//! changes, after which the student may resubmit.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
