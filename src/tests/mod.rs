// src/tests/mod.rs

//! Tests for _gcslib_.
//!
//! Tests are placed at `src/tests/`, inside the `gcslib`. This is a
//! reasonable trade-off of separation and access.
//!
//! Tests placed at top-level path `tests/` do not have crate-internal
//! visibility, e.g. the preprocessor counters and the compiled catalog.

pub mod classifier_tests;
pub mod common;
pub mod extractor_tests;
pub mod gclogprocessor_tests;
pub mod units_tests;
