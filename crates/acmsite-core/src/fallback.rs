//! Local fallback dataset.
//!
//! A copy of the content document is compiled into the binary so the site can
//! render when the remote source is down. Deployments can point
//! `FALLBACK_PATH` at a newer copy on disk instead.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::Config;
use crate::models::ContentBundle;

const BUNDLED_CONTENT: &str = include_str!("../data/content.json");

/// The dataset compiled into the binary, normalized.
pub fn bundled() -> Result<ContentBundle> {
    ContentBundle::from_json(BUNDLED_CONTENT.as_bytes())
        .context("Bundled fallback dataset is invalid")
}

/// Load and normalize a fallback dataset from disk.
pub fn load(path: &Path) -> Result<ContentBundle> {
    let contents = std::fs::read(path)
        .with_context(|| format!("Failed to read fallback dataset: {}", path.display()))?;

    ContentBundle::from_json(&contents)
        .with_context(|| format!("Failed to parse fallback dataset: {}", path.display()))
}

/// Resolve the fallback dataset the configuration asks for.
///
/// Returns `None` when the fallback is disabled. An override path that cannot
/// be loaded is an error rather than a silent switch to the bundled copy.
pub fn from_config(config: &Config) -> Result<Option<ContentBundle>> {
    if !config.fallback_enabled {
        info!("Fallback dataset disabled");
        return Ok(None);
    }

    let bundle = match &config.fallback_path {
        Some(path) => {
            let bundle = load(path)?;
            info!(path = %path.display(), "Loaded fallback dataset from disk");
            bundle
        }
        None => {
            let bundle = bundled()?;
            debug!("Using bundled fallback dataset");
            bundle
        }
    };

    debug!(
        team = bundle.team_members.len(),
        events = bundle.event_count(),
        "Fallback dataset ready"
    );
    Ok(Some(bundle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn config(fallback_enabled: bool, fallback_path: Option<PathBuf>) -> Config {
        Config::from_lookup(|key| match key {
            "CONTENT_URL" => Some("https://cdn.example.org/content.json".to_string()),
            _ => None,
        })
        .map(|c| Config {
            fallback_enabled,
            fallback_path,
            ..c
        })
        .unwrap()
    }

    #[test]
    fn test_bundled_dataset_parses_and_derives_events() {
        let bundle = bundled().unwrap();
        assert!(!bundle.team_members.is_empty());
        assert!(!bundle.nav_links.is_empty());
        assert_eq!(bundle.events.len(), bundle.event_count());
        assert_eq!(
            bundle.events.first().map(|e| &e.id),
            bundle.future_events.first().map(|e| &e.id)
        );
        assert!(bundle.site_config.year.is_some());
    }

    #[test]
    fn test_disabled_returns_none() {
        assert!(from_config(&config(false, None)).unwrap().is_none());
    }

    #[test]
    fn test_enabled_without_path_uses_bundled() {
        let bundle = from_config(&config(true, None)).unwrap().unwrap();
        assert_eq!(bundle, bundled().unwrap());
    }

    #[test]
    fn test_override_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"benefits": ["Override"], "futureEvents": [{{"id": "f", "title": "F"}}]}}"#
        )
        .unwrap();

        let bundle = from_config(&config(true, Some(file.path().to_path_buf())))
            .unwrap()
            .unwrap();
        assert_eq!(bundle.benefits, vec!["Override".to_string()]);
        assert_eq!(bundle.events.len(), 1);
    }

    #[test]
    fn test_missing_override_is_error() {
        let err = from_config(&config(true, Some(PathBuf::from("/nonexistent/content.json"))))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read fallback dataset"));
    }

    #[test]
    fn test_malformed_override_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse fallback dataset"));
    }
}
