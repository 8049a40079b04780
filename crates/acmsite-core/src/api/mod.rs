//! Remote content source.
//!
//! This module provides the `ContentSource` seam the data provider fetches
//! through, and `RemoteSource`, which downloads the content document over
//! HTTPS from the configured URL.

pub mod client;
pub mod error;

use futures::future::BoxFuture;

pub use client::RemoteSource;
pub use error::FetchError;

use crate::models::ContentBundle;

/// Anything that can produce a fresh content document.
pub trait ContentSource: Send + Sync {
    fn fetch(&self) -> BoxFuture<'_, Result<ContentBundle, FetchError>>;

    /// Short description used in log lines
    fn describe(&self) -> String;
}
