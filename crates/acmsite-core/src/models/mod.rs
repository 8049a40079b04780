//! Data models for the chapter website content.
//!
//! This module contains the structures of the content document served by the
//! remote source and bundled as the local fallback:
//!
//! - `ContentBundle`: the whole document plus the derived `events` list
//! - `SiteConfig`, `NavLink`, `SocialLinks`: layout and branding data
//! - `Event`: upcoming and past chapter events
//! - `TeamMember`: committee and team rosters

pub mod content;
pub mod event;
pub mod site;
pub mod team;

pub use content::ContentBundle;
pub use event::Event;
pub use site::{Address, Intro, NavLink, Organization, SiteConfig, SocialLinks};
pub use team::{TeamCategory, TeamMember};
