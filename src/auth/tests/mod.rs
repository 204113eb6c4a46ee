//! Unit tests for authentication.

mod session_tests;
