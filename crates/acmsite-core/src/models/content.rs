use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::{Event, NavLink, SiteConfig, SocialLinks, TeamCategory, TeamMember};
use crate::api::FetchError;

/// The full content document: site text, team and events.
///
/// `events` is derived (future events followed by past events) and is never
/// read from the document; [`ContentBundle::normalize`] recomputes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentBundle {
    pub site_config: SiteConfig,
    pub nav_links: Vec<NavLink>,
    pub social_links: SocialLinks,
    pub benefits: Vec<String>,
    pub team_members: Vec<TeamMember>,
    pub future_events: Vec<Event>,
    pub past_events: Vec<Event>,
    pub top_highlight: Option<Event>,
    #[serde(skip_deserializing)]
    pub events: Vec<Event>,
}

impl ContentBundle {
    /// Parse a content document and normalize it.
    ///
    /// The top level must be a JSON object; anything else, or a recognized
    /// field of the wrong shape, is a parse failure.
    pub fn from_json(bytes: &[u8]) -> Result<Self, FetchError> {
        let value: serde_json::Value = serde_json::from_slice(bytes)
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        if !value.is_object() {
            return Err(FetchError::Parse(
                "content document is not a JSON object".to_string(),
            ));
        }

        let bundle: ContentBundle =
            serde_json::from_value(value).map_err(|e| FetchError::Parse(e.to_string()))?;

        Ok(bundle.normalize())
    }

    /// Recompute derived fields. Idempotent.
    pub fn normalize(mut self) -> Self {
        self.events = self
            .future_events
            .iter()
            .chain(self.past_events.iter())
            .cloned()
            .collect();

        if self.site_config.year.is_none() {
            self.site_config.year = Some(Utc::now().year());
        }

        self
    }

    pub fn members_in(&self, category: TeamCategory) -> Vec<&TeamMember> {
        self.team_members
            .iter()
            .filter(|m| m.in_category(category))
            .collect()
    }

    pub fn member_named(&self, name: &str) -> Option<&TeamMember> {
        self.team_members.iter().find(|m| m.name == name)
    }

    pub fn event_count(&self) -> usize {
        self.future_events.len() + self.past_events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> serde_json::Value {
        serde_json::json!({
            "siteConfig": { "name": "Chapter", "year": 2025 },
            "navLinks": [{ "name": "Home", "href": "/", "id": "home" }],
            "socialLinks": { "instagram": "https://instagram.com/chapter" },
            "benefits": ["Workshops"],
            "teamMembers": [
                { "id": "a", "name": "Ann", "role": "Chairperson", "category": "Core Committee" },
                { "id": "b", "name": "Ben", "role": "Tech Member", "category": "Tech Team" }
            ],
            "futureEvents": [{ "id": "e1", "title": "E1" }],
            "pastEvents": [{ "id": "e2", "title": "E2" }],
            "events": [{ "id": "bogus", "title": "Ignored" }]
        })
    }

    #[test]
    fn test_from_json_derives_events_in_order() {
        let bundle = ContentBundle::from_json(doc().to_string().as_bytes()).unwrap();
        let ids: Vec<&str> = bundle.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e2"]);
        assert_eq!(bundle.event_count(), 2);
        assert!(bundle.top_highlight.is_none());
    }

    #[test]
    fn test_from_json_keeps_authored_year() {
        let bundle = ContentBundle::from_json(doc().to_string().as_bytes()).unwrap();
        assert_eq!(bundle.site_config.year, Some(2025));
    }

    #[test]
    fn test_normalize_fills_missing_year() {
        let bundle = ContentBundle::default().normalize();
        assert_eq!(bundle.site_config.year, Some(Utc::now().year()));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = ContentBundle::from_json(doc().to_string().as_bytes()).unwrap();
        let twice = once.clone().normalize();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let err = ContentBundle::from_json(b"[1, 2, 3]").unwrap_err();
        assert!(err.is_parse_failure());
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = ContentBundle::from_json(b"{\"futureEvents\": ").unwrap_err();
        assert!(err.is_parse_failure());
    }

    #[test]
    fn test_from_json_rejects_wrong_field_shape() {
        let err = ContentBundle::from_json(br#"{"benefits": "not a list"}"#).unwrap_err();
        assert!(err.is_parse_failure());
    }

    #[test]
    fn test_members_in_and_member_named() {
        let bundle = ContentBundle::from_json(doc().to_string().as_bytes()).unwrap();
        let core = bundle.members_in(TeamCategory::CoreCommittee);
        assert_eq!(core.len(), 1);
        assert_eq!(core[0].name, "Ann");
        assert!(bundle.member_named("Ben").is_some());
        assert!(bundle.member_named("Nobody").is_none());
    }
}
