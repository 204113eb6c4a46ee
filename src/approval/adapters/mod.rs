//! Adapter implementations of the approval port.

pub mod memory;
pub mod postgres;
