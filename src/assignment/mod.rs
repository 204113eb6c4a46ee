//! Student applications ("assignments") to project listings.
//!
//! Students apply to listings, staff accept or reject them, and accepted
//! students form the project team. Accepting an application generates a
//! portfolio entry.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
