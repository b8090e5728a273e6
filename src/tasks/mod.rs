//! Background Tasks Module
//!
//! Contains optional background tasks that run alongside the cache.
//!
//! # Tasks
//! - Expiry sweep: periodically purges expired entries that are never read again

mod sweep;

pub use sweep::spawn_sweep_task;
