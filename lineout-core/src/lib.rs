//! Event line formatting pipeline.
//!
//! Raw event records flow in one at a time and come out as rendered,
//! optionally colored, newline-terminated text lines:
//!
//! record
//! Envelope (decoded once)
//! Reporter
//! render | TailCorrelator
//! compose
//! rendered line

pub mod compose;
pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod palette;
pub mod render;
pub mod reporter;
pub mod tail;
pub mod timefmt;
