//! User accounts, roles and account status.
//!
//! Students register themselves and wait for approval; staff accounts are
//! created by managers. Accounts are soft-deleted so their email stays
//! reserved, and every change that must invalidate issued tokens bumps the
//! account's token version.
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
