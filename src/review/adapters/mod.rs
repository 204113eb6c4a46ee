//! Adapter implementations of the review port.

pub mod memory;
pub mod postgres;
