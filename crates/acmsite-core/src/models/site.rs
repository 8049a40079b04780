use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Platform name ("instagram", "linkedin", ...) to URL.
pub type SocialLinks = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub keywords: String,
    pub logo: String,
    pub email: String,
    pub web_admin_email: String,
    pub join_url: String,
    /// Copyright year; filled with the current year when the document omits it
    pub year: Option<i32>,
    pub intro: Intro,
    pub vision: String,
    pub mission: String,
    pub site_url: String,
    pub og_image: String,
    pub twitter_handle: String,
    pub locale: String,
    pub organization: Organization,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Intro {
    pub heading: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Organization {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub alternate_name: String,
    pub parent_organization: String,
    pub address: Address,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub street_address: String,
    pub address_locality: String,
    pub address_region: String,
    pub postal_code: String,
    pub address_country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub name: String,
    pub href: String,
    #[serde(default)]
    pub id: String,
}

impl NavLink {
    /// Whether this link points at the page being served
    pub fn is_active(&self, current_path: &str) -> bool {
        self.href == current_path
    }
}
