//! Dashboards and per-student statistics for managers and HR.
//!
//! Reporting owns no storage. It reads through the user, task, assignment
//! and review ports and assembles read models in [`domain`].

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
