//! Mentor reviews of finished team work.
//!
//! Reviewing an active assignment rates the student from 1 to 5 and closes
//! the assignment as `done`. Each assignment receives at most one review.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
