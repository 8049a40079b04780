//! Data provider: cached access to the current content bundle.
//!
//! Request handlers call [`DataProvider::get_current_bundle`] once per
//! request. A fresh cache entry is returned without I/O. Otherwise one fetch
//! is made (shared by every caller that arrives while it is in flight), and
//! on failure the provider falls back to the local dataset, then to the stale
//! cache entry. Only when all three are unavailable does an error escape.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::api::{ContentSource, FetchError};
use crate::cache::{age_display, CacheStatus, CacheStore, Clock, SystemClock};
use crate::config::Config;
use crate::models::ContentBundle;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error(
        "No content available: remote fetch failed ({cause}) and no fallback or cached copy exists"
    )]
    ExhaustedSources { cause: FetchError },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderSettings {
    /// A cache entry younger than this is served without fetching
    pub freshness: Duration,
    /// Upper bound on one fetch; elapsing counts as a fetch failure
    pub fetch_timeout: Duration,
}

impl From<&Config> for ProviderSettings {
    fn from(config: &Config) -> Self {
        Self {
            freshness: config.cache_ttl,
            fetch_timeout: config.fetch_timeout,
        }
    }
}

type Refresh = Shared<BoxFuture<'static, Result<Arc<ContentBundle>, FetchError>>>;

pub struct DataProvider {
    source: Arc<dyn ContentSource>,
    cache: Arc<CacheStore>,
    fallback: Option<Arc<ContentBundle>>,
    settings: ProviderSettings,
    in_flight: Mutex<Option<Refresh>>,
}

impl DataProvider {
    pub fn new(
        source: Arc<dyn ContentSource>,
        fallback: Option<ContentBundle>,
        settings: ProviderSettings,
    ) -> Self {
        Self::with_clock(source, fallback, settings, Arc::new(SystemClock))
    }

    pub fn with_clock(
        source: Arc<dyn ContentSource>,
        fallback: Option<ContentBundle>,
        settings: ProviderSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            cache: Arc::new(CacheStore::with_clock(clock)),
            fallback: fallback.map(|bundle| Arc::new(bundle.normalize())),
            settings,
            in_flight: Mutex::new(None),
        }
    }

    pub fn settings(&self) -> ProviderSettings {
        self.settings
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Warm the cache before serving. Must complete before the listener is
    /// bound; an error here means the process has nothing to serve.
    pub async fn initialize(&self) -> Result<Arc<ContentBundle>, ProviderError> {
        info!(source = %self.source.describe(), "Loading initial content");
        let bundle = self.get_current_bundle().await?;
        info!(
            team = bundle.team_members.len(),
            events = bundle.events.len(),
            cached = self.cache.get().is_some(),
            "Initial content ready"
        );
        Ok(bundle)
    }

    /// The current content bundle.
    pub async fn get_current_bundle(&self) -> Result<Arc<ContentBundle>, ProviderError> {
        if let Some(entry) = self.cache.fresh(self.settings.freshness) {
            debug!(cached_at = %entry.cached_at, "Content cache hit");
            return Ok(entry.bundle);
        }

        let refresh = self.join_refresh();
        let outcome = refresh.clone().await;
        self.finish_refresh(&refresh);

        match outcome {
            Ok(bundle) => Ok(bundle),
            Err(cause) => self.recover(cause),
        }
    }

    pub fn cache_status(&self) -> CacheStatus {
        self.cache.status(self.settings.freshness)
    }

    /// Drop the cached bundle so the next call fetches.
    pub fn invalidate(&self) {
        self.cache.clear();
    }

    /// Join the fetch already in flight, or start one.
    fn join_refresh(&self) -> Refresh {
        let mut slot = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(refresh) = slot.as_ref() {
            debug!("Joining in-flight content fetch");
            return refresh.clone();
        }

        let source = Arc::clone(&self.source);
        let cache = Arc::clone(&self.cache);
        let timeout = self.settings.fetch_timeout;

        let refresh = async move {
            debug!(source = %source.describe(), "Fetching remote content");
            let bundle = match tokio::time::timeout(timeout, source.fetch()).await {
                Ok(Ok(bundle)) => bundle,
                Ok(Err(e)) => return Err(e),
                Err(_) => return Err(FetchError::Timeout(timeout)),
            };

            let bundle = Arc::new(bundle.normalize());
            cache.set(Arc::clone(&bundle));
            info!(
                team = bundle.team_members.len(),
                future_events = bundle.future_events.len(),
                past_events = bundle.past_events.len(),
                "Remote content fetched"
            );
            Ok(bundle)
        }
        .boxed()
        .shared();

        *slot = Some(refresh.clone());
        refresh
    }

    /// Clear the in-flight slot if it still holds `refresh`.
    fn finish_refresh(&self, refresh: &Refresh) {
        let mut slot = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|current| current.ptr_eq(refresh)) {
            *slot = None;
        }
    }

    fn recover(&self, cause: FetchError) -> Result<Arc<ContentBundle>, ProviderError> {
        warn!(error = %cause, "Remote content fetch failed");

        // The fallback is never cached, so the next request retries the network.
        if let Some(fallback) = &self.fallback {
            warn!("Serving fallback dataset");
            return Ok(Arc::clone(fallback));
        }

        if let Some(entry) = self.cache.get() {
            warn!(
                cached_at = %entry.cached_at,
                age = %age_display(self.cache.age_of(&entry)),
                "Serving stale cached content"
            );
            return Ok(entry.bundle);
        }

        error!(error = %cause, "No content source available");
        Err(ProviderError::ExhaustedSources { cause })
    }
}
