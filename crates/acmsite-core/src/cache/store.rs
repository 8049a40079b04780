use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use super::Clock;
use crate::models::ContentBundle;

/// The most recently fetched bundle and when it was fetched.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub bundle: Arc<ContentBundle>,
    /// Wall time of the fetch, for logs and status only
    pub cached_at: DateTime<Utc>,
    stored_at: Instant,
}

impl CacheEntry {
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.stored_at)
    }

    pub fn is_fresh(&self, now: Instant, window: Duration) -> bool {
        self.age(now) < window
    }
}

/// Human-readable age rounded to the nearest unit: "just now", "5m ago", "2h ago", "3d ago".
pub fn age_display(age: Duration) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;

    match age.as_secs() {
        secs if secs < MINUTE => "just now".to_string(),
        secs if secs < HOUR => format!("{}m ago", secs / MINUTE),
        secs if secs < DAY => format!("{}h ago", (secs + HOUR / 2) / HOUR),
        secs => format!("{}d ago", (secs + DAY / 2) / DAY),
    }
}

/// Snapshot of the cache for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
    pub cached: bool,
    pub cached_at: Option<DateTime<Utc>>,
    pub age: Option<String>,
    pub fresh: bool,
}

/// Holds at most one cache entry, replaced whole on every `set`.
pub struct CacheStore {
    entry: RwLock<Option<CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entry: RwLock::new(None),
            clock,
        }
    }

    pub fn get(&self) -> Option<CacheEntry> {
        self.entry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Store `bundle` as the current entry, stamped with the clock's time.
    pub fn set(&self, bundle: Arc<ContentBundle>) -> CacheEntry {
        let entry = CacheEntry {
            bundle,
            cached_at: self.clock.now(),
            stored_at: self.clock.instant(),
        };
        *self.entry.write().unwrap_or_else(PoisonError::into_inner) = Some(entry.clone());
        debug!(cached_at = %entry.cached_at, "Content cache updated");
        entry
    }

    pub fn clear(&self) {
        *self.entry.write().unwrap_or_else(PoisonError::into_inner) = None;
        debug!("Content cache cleared");
    }

    pub fn age_of(&self, entry: &CacheEntry) -> Duration {
        entry.age(self.clock.instant())
    }

    /// The cached entry if it is younger than `window`
    pub fn fresh(&self, window: Duration) -> Option<CacheEntry> {
        let now = self.clock.instant();
        self.get().filter(|entry| entry.is_fresh(now, window))
    }

    pub fn status(&self, window: Duration) -> CacheStatus {
        let now = self.clock.instant();
        match self.get() {
            Some(entry) => CacheStatus {
                cached: true,
                cached_at: Some(entry.cached_at),
                age: Some(age_display(entry.age(now))),
                fresh: entry.is_fresh(now, window),
            },
            None => CacheStatus {
                cached: false,
                cached_at: None,
                age: None,
                fresh: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    const WINDOW: Duration = Duration::from_secs(30);

    fn store() -> (CacheStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        (CacheStore::with_clock(clock.clone()), clock)
    }

    #[test]
    fn test_empty_store() {
        let (store, _) = store();
        assert!(store.get().is_none());
        assert!(store.fresh(WINDOW).is_none());
        assert!(!store.status(WINDOW).cached);
    }

    #[test]
    fn test_set_then_get_same_bundle() {
        let (store, clock) = store();
        let bundle = Arc::new(ContentBundle::default());
        store.set(bundle.clone());

        let entry = store.get().unwrap();
        assert!(Arc::ptr_eq(&entry.bundle, &bundle));
        assert_eq!(entry.cached_at, clock.now());
    }

    #[test]
    fn test_entry_goes_stale_at_window() {
        let (store, clock) = store();
        store.set(Arc::new(ContentBundle::default()));

        clock.advance(Duration::from_secs(29));
        assert!(store.fresh(WINDOW).is_some());

        // Fresh means strictly younger than the window
        clock.advance(Duration::from_secs(1));
        assert!(store.fresh(WINDOW).is_none());
        assert!(store.get().is_some(), "stale entry is still retained");
    }

    #[test]
    fn test_set_replaces_and_restamps() {
        let (store, clock) = store();
        store.set(Arc::new(ContentBundle::default()));
        clock.advance(Duration::from_secs(60));

        let newer = Arc::new(ContentBundle {
            benefits: vec!["new".to_string()],
            ..Default::default()
        });
        store.set(newer.clone());

        let entry = store.get().unwrap();
        assert!(Arc::ptr_eq(&entry.bundle, &newer));
        assert!(store.fresh(WINDOW).is_some());
    }

    #[test]
    fn test_clear() {
        let (store, _) = store();
        store.set(Arc::new(ContentBundle::default()));
        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_wall_clock_step_back_does_not_extend_freshness() {
        let (store, clock) = store();
        store.set(Arc::new(ContentBundle::default()));

        clock.step_wall(chrono::Duration::hours(-1));
        clock.advance(Duration::from_secs(50 * 60));

        assert!(store.fresh(WINDOW).is_none());
        assert_eq!(store.status(WINDOW).age.as_deref(), Some("50m ago"));
    }

    #[test]
    fn test_wall_clock_step_forward_does_not_expire_early() {
        let (store, clock) = store();
        store.set(Arc::new(ContentBundle::default()));

        clock.step_wall(chrono::Duration::hours(2));
        clock.advance(Duration::from_secs(10));

        assert!(store.fresh(WINDOW).is_some());
    }

    #[test]
    fn test_status_reports_age() {
        let (store, clock) = store();
        let entry = store.set(Arc::new(ContentBundle::default()));
        clock.advance(Duration::from_secs(5 * 60));

        let status = store.status(WINDOW);
        assert!(status.cached);
        assert!(!status.fresh);
        assert_eq!(status.age.as_deref(), Some("5m ago"));
        assert_eq!(store.age_of(&entry), Duration::from_secs(300));
    }

    #[test]
    fn test_age_display() {
        assert_eq!(age_display(Duration::from_secs(10)), "just now");
        assert_eq!(age_display(Duration::from_secs(5 * 60)), "5m ago");
        assert_eq!(age_display(Duration::from_secs(90 * 60)), "2h ago");
        assert_eq!(age_display(Duration::from_secs(70 * 60)), "1h ago");
        assert_eq!(age_display(Duration::from_secs(36 * 3600)), "2d ago");
        assert_eq!(age_display(Duration::from_secs(25 * 3600)), "1d ago");
    }
}
