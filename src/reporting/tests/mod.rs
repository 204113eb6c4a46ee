//! Unit tests for the reporting context.

mod dashboard_tests;
