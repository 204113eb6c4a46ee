//! Project discussion: public comments and questions.
//!
//! Questions may be private to a recipient and carry meeting details.
//! Students need an NDA-accepted application to take part in the
//! discussion of an NDA listing.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
