//! Cache-related MCP tools.
//!
//! This module exposes statistics for the shared result cache and lets the
//! host clear it.

pub mod clear;
pub mod stats;

pub use clear::{CacheClearParams, clear_impl};
pub use stats::stats_impl;
