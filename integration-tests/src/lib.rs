//! Shared fixture records for the end-to-end pipeline tests.

pub mod fixtures;
