//! Adapter implementations of the assignment port.

pub mod memory;
pub mod postgres;
