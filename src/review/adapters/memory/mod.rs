//! In-memory review adapter.

mod reviews;

pub use reviews::InMemoryReviewRepository;
