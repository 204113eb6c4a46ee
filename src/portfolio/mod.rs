//! Portfolio entries generated from team membership.
//!
//! An entry is recorded once per assignment when the student joins a
//! project team. Listing a portfolio joins each entry with the mentor
//! review of the same assignment, when one exists.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
