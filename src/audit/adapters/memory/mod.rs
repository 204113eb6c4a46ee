//! In-memory audit adapters.

mod log;

pub use log::InMemoryAuditRepository;
