use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    /// Display string as authored ("Jan 31, 2026"), not parsed.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(
        rename = "registrationUrl",
        alias = "registerUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub registration_url: Option<String>,
}

impl Event {
    pub fn has_gallery(&self) -> bool {
        !self.photos.is_empty()
    }

    /// Registration is open when a non-empty, non-placeholder link is present
    pub fn is_registration_open(&self) -> bool {
        self.registration_url
            .as_deref()
            .map(str::trim)
            .is_some_and(|url| !url.is_empty() && url != "#")
    }
}
