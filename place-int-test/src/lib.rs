//! Shared fixtures for the place workspace integration tests.

pub mod test_util;
