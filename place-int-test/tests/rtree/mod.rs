//! R-Tree integration test module.
//!
//! These tests drive the index through its public surface only.

mod concurrency_test;
mod invariant_test;
mod scenario_test;
