use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Team categories in the order the team page lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamCategory {
    FacultyAdvisor,
    CoreCommittee,
    TechTeam,
    DesignTeam,
    MembershipAdvisors,
    MediaTeam,
    ContentTeam,
}

impl TeamCategory {
    pub const ALL: [TeamCategory; 7] = [
        TeamCategory::FacultyAdvisor,
        TeamCategory::CoreCommittee,
        TeamCategory::TechTeam,
        TeamCategory::DesignTeam,
        TeamCategory::MembershipAdvisors,
        TeamCategory::MediaTeam,
        TeamCategory::ContentTeam,
    ];

    /// Category label as it appears in the content document
    pub fn label(&self) -> &'static str {
        match self {
            TeamCategory::FacultyAdvisor => "Faculty Advisor",
            TeamCategory::CoreCommittee => "Core Committee",
            TeamCategory::TechTeam => "Tech Team",
            TeamCategory::DesignTeam => "Design Team",
            TeamCategory::MembershipAdvisors => "Membership Advisors",
            TeamCategory::MediaTeam => "Media Team",
            TeamCategory::ContentTeam => "Content Team",
        }
    }

    /// Key used when grouping members for page views
    pub fn key(&self) -> &'static str {
        match self {
            TeamCategory::FacultyAdvisor => "facultyAdvisor",
            TeamCategory::CoreCommittee => "coreCommittee",
            TeamCategory::TechTeam => "techTeam",
            TeamCategory::DesignTeam => "designTeam",
            TeamCategory::MembershipAdvisors => "membershipAdvisors",
            TeamCategory::MediaTeam => "mediaTeam",
            TeamCategory::ContentTeam => "contentTeam",
        }
    }
}

impl std::fmt::Display for TeamCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    /// Platform name to profile URL
    #[serde(default)]
    pub socials: BTreeMap<String, String>,
}

impl TeamMember {
    pub fn in_category(&self, category: TeamCategory) -> bool {
        self.category == category.label()
    }

    /// Social links with placeholder ("#") or empty URLs removed
    pub fn active_socials(&self) -> impl Iterator<Item = (&str, &str)> {
        self.socials
            .iter()
            .filter(|(_, url)| !url.is_empty() && url.as_str() != "#")
            .map(|(platform, url)| (platform.as_str(), url.as_str()))
    }
}
