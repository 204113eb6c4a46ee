//! Audit trail of business actions.
//!
//! Services record who did what to which entity. The trail is best effort:
//! a failed write is logged at `warn` and the triggering operation proceeds.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
