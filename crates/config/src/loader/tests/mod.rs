//! Tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test profile loading from files.
//! - Test environment variable handling and precedence.
//! - Test dotenv gating.
//! - Test build-time validation.
//!
//! Invariants:
//! - Tests that touch process-global state (env, cwd) use `serial_test`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

pub mod profile_tests;
