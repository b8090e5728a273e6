//! Dash Cache - A bounded in-memory cache for a dashboard application
//!
//! Provides a synchronous key-value store with per-entry TTL, lazy expiry and
//! oldest-first eviction, plus page, API and route namespaces on top of it.

pub mod cache;
pub mod config;
pub mod error;
pub mod integration;
pub mod tasks;

pub use cache::{CacheManager, CacheStats, Namespace};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_sweep_task;
