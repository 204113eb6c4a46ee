//! Unit tests for the portfolio context.

mod entry_tests;
