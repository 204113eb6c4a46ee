//! Adapter implementations of the portfolio port.

pub mod memory;
pub mod postgres;
