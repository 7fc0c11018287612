// src/tests/mod.rs

//! Tests for _logreconlib_.
//!
//! Tests are placed at `src/tests/`, inside the `logreconlib`. This is a
//! reasonable trade-off of separation and access.
//!
//! Tests placed at top-level path `tests/` do not have crate-internal
//! visibility. Those tests use only the public API.

pub mod config_tests;
pub mod datetime_tests;
pub mod helpers_tests;
pub mod record_tests;
