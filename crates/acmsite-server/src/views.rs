//! Page view models built from the current content bundle.
//!
//! Each page carries the shared layout data (site config, navigation, social
//! links, current path) plus its own sections. Rendering them to HTML is the
//! job of whatever sits in front of this server.

use std::collections::BTreeMap;

use serde::Serialize;

use acmsite_core::models::{
    ContentBundle, Event, NavLink, SiteConfig, SocialLinks, TeamCategory, TeamMember,
};

/// Number of events shown on the home page.
pub const FEATURED_EVENT_COUNT: usize = 4;

/// Roles featured on the home page.
const FEATURED_ROLES: [&str; 4] = ["Faculty Advisor", "Chairperson", "Secretary", "Treasurer"];

/// People listed as contacts on the about page, with their WhatsApp numbers.
const CONTACTS: [(&str, &str); 3] = [
    ("Afrin Asif", "919495860051"),
    ("Aditi AM", "919876543211"),
    ("Bensen Biju", "918547421918"),
];

#[derive(Debug, Serialize)]
pub struct NavItem<'a> {
    #[serde(flatten)]
    pub link: &'a NavLink,
    pub active: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout<'a> {
    pub site_config: &'a SiteConfig,
    pub nav_links: Vec<NavItem<'a>>,
    pub social_links: &'a SocialLinks,
    pub current_path: &'a str,
}

impl<'a> Layout<'a> {
    pub fn new(bundle: &'a ContentBundle, current_path: &'a str) -> Self {
        let nav_links = bundle
            .nav_links
            .iter()
            .map(|link| NavItem {
                link,
                active: link.is_active(current_path),
            })
            .collect();

        Self {
            site_config: &bundle.site_config,
            nav_links,
            social_links: &bundle.social_links,
            current_path,
        }
    }
}

/// An event plus the flags templates branch on.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCard<'a> {
    #[serde(flatten)]
    pub event: &'a Event,
    pub registration_open: bool,
    pub has_gallery: bool,
}

impl<'a> From<&'a Event> for EventCard<'a> {
    fn from(event: &'a Event) -> Self {
        Self {
            event,
            registration_open: event.is_registration_open(),
            has_gallery: event.has_gallery(),
        }
    }
}

fn event_cards(events: &[Event]) -> Vec<EventCard<'_>> {
    events.iter().map(EventCard::from).collect()
}

/// A team member with placeholder social links dropped.
#[derive(Debug, Serialize)]
pub struct MemberCard<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub role: &'a str,
    pub category: &'a str,
    pub image: &'a str,
    pub socials: BTreeMap<&'a str, &'a str>,
}

impl<'a> From<&'a TeamMember> for MemberCard<'a> {
    fn from(member: &'a TeamMember) -> Self {
        Self {
            id: &member.id,
            name: &member.name,
            role: &member.role,
            category: &member.category,
            image: &member.image,
            socials: member.active_socials().collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage<'a> {
    #[serde(flatten)]
    pub layout: Layout<'a>,
    pub title: String,
    pub featured_events: Vec<EventCard<'a>>,
    pub featured_team: Vec<MemberCard<'a>>,
    pub benefits: &'a [String],
    pub top_highlight: Option<EventCard<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsPage<'a> {
    #[serde(flatten)]
    pub layout: Layout<'a>,
    pub title: String,
    pub future_events: Vec<EventCard<'a>>,
    pub past_events: Vec<EventCard<'a>>,
    pub events: Vec<EventCard<'a>>,
}

#[derive(Debug, Serialize)]
pub struct TeamGroup<'a> {
    pub key: &'static str,
    pub label: &'static str,
    pub members: Vec<MemberCard<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPage<'a> {
    #[serde(flatten)]
    pub layout: Layout<'a>,
    pub title: String,
    pub groups: Vec<TeamGroup<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ContactPerson<'a> {
    #[serde(flatten)]
    pub member: MemberCard<'a>,
    pub whatsapp: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutPage<'a> {
    #[serde(flatten)]
    pub layout: Layout<'a>,
    pub title: String,
    pub contact_persons: Vec<ContactPerson<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundPage<'a> {
    #[serde(flatten)]
    pub layout: Layout<'a>,
    pub title: &'static str,
}

fn page_title(prefix: &str, bundle: &ContentBundle) -> String {
    format!("{} - {}", prefix, bundle.site_config.name)
}

/// Members holding one of the featured roles, in roster order.
pub fn featured_team(bundle: &ContentBundle) -> Vec<&TeamMember> {
    bundle
        .team_members
        .iter()
        .filter(|m| FEATURED_ROLES.contains(&m.role.as_str()))
        .collect()
}

pub fn featured_events(bundle: &ContentBundle, count: usize) -> &[Event] {
    &bundle.events[..bundle.events.len().min(count)]
}

pub fn team_groups(bundle: &ContentBundle) -> Vec<TeamGroup<'_>> {
    TeamCategory::ALL
        .iter()
        .map(|category| TeamGroup {
            key: category.key(),
            label: category.label(),
            members: bundle
                .members_in(*category)
                .into_iter()
                .map(MemberCard::from)
                .collect(),
        })
        .collect()
}

/// Contact people present in the roster; names not found are skipped.
pub fn contact_persons(bundle: &ContentBundle) -> Vec<ContactPerson<'_>> {
    CONTACTS
        .iter()
        .filter_map(|&(name, whatsapp)| {
            bundle.member_named(name).map(|member| ContactPerson {
                member: MemberCard::from(member),
                whatsapp,
            })
        })
        .collect()
}

pub fn home<'a>(bundle: &'a ContentBundle, path: &'a str) -> HomePage<'a> {
    HomePage {
        layout: Layout::new(bundle, path),
        title: bundle.site_config.name.clone(),
        featured_events: event_cards(featured_events(bundle, FEATURED_EVENT_COUNT)),
        featured_team: featured_team(bundle)
            .into_iter()
            .map(MemberCard::from)
            .collect(),
        benefits: &bundle.benefits,
        top_highlight: bundle.top_highlight.as_ref().map(EventCard::from),
    }
}

pub fn events<'a>(bundle: &'a ContentBundle, path: &'a str) -> EventsPage<'a> {
    EventsPage {
        layout: Layout::new(bundle, path),
        title: page_title("Events", bundle),
        future_events: event_cards(&bundle.future_events),
        past_events: event_cards(&bundle.past_events),
        events: event_cards(&bundle.events),
    }
}

pub fn team<'a>(bundle: &'a ContentBundle, path: &'a str) -> TeamPage<'a> {
    TeamPage {
        layout: Layout::new(bundle, path),
        title: page_title("Our Team", bundle),
        groups: team_groups(bundle),
    }
}

pub fn about<'a>(bundle: &'a ContentBundle, path: &'a str) -> AboutPage<'a> {
    AboutPage {
        layout: Layout::new(bundle, path),
        title: page_title("About Us", bundle),
        contact_persons: contact_persons(bundle),
    }
}

pub fn not_found<'a>(bundle: &'a ContentBundle, path: &'a str) -> NotFoundPage<'a> {
    NotFoundPage {
        layout: Layout::new(bundle, path),
        title: "404 - Page Not Found",
    }
}
