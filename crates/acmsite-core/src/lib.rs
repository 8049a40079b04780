//! Core library for the NSSCE ACM Student Chapter website.
//!
//! Provides the content models, the remote content source, the bundled
//! fallback dataset, the in-memory cache and the `DataProvider` that ties
//! them together for request handlers.

pub mod api;
pub mod cache;
pub mod config;
pub mod fallback;
pub mod models;
pub mod provider;

pub use api::{ContentSource, FetchError, RemoteSource};
pub use cache::{CacheStatus, CacheStore};
pub use config::{Config, ConfigError};
pub use models::ContentBundle;
pub use provider::{DataProvider, ProviderError, ProviderSettings};
