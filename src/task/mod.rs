//! Project listings ("tasks").
//!
//! Curators and managers publish listings; students browse the public,
//! running ones. Each role sees a different slice of the catalogue, and
//! NDA listings are redacted for students until they accept the NDA.
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
