//! Utility functions and helpers for clixaw.
//!
//! # Submodules
//!
//! - `clipboard`: System clipboard access for `--copy`.
//! - `logging`: Tracing initialization and secret masking.
//! - `timestamp`: Serde codec for persisted ISO-8601 timestamps.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod clipboard;
pub mod logging;
pub mod timestamp;
