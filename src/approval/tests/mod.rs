//! Unit tests for the approval context.

mod service_tests;
