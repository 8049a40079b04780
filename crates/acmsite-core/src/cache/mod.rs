//! In-memory content cache.
//!
//! This module provides the `CacheStore` holding the single most recently
//! fetched content bundle and the time it was fetched, and the `Clock`
//! abstraction the store stamps and ages entries with.

pub mod clock;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{age_display, CacheEntry, CacheStatus, CacheStore};
