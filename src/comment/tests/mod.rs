//! Unit tests for the comment context.

mod discussion_tests;
mod domain_tests;
