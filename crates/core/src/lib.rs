//! Core types and shared functionality for pexwall.
//!
//! This crate provides:
//! - In-memory expiring cache with an injectable clock
//! - Unified error types
//! - Configuration structures
//! - The normalized media item schema shared by every provider

pub mod cache;
pub mod config;
pub mod error;
pub mod media;

pub use cache::{CacheStats, Clock, ExpiringCache, ManualClock, SystemClock};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use media::{DurationFilter, MediaItem, MediaKind, MediaVariant, format_duration};
