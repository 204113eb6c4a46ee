//! In-memory approval adapter.

mod approval;

pub use approval::InMemoryApprovalRepository;
