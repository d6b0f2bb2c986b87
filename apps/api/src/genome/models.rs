use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const UNKNOWN_NAME: &str = "Unknown";
pub const UNKNOWN_HANDLE: &str = "unknown";
pub const NO_HEADLINE: &str = "No headline";
pub const UNKNOWN_LOCATION: &str = "Unknown location";
pub const UNKNOWN_ORGANIZATION: &str = "Unknown Organization";
pub const DEFAULT_THEME: &str = "default";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalProfile {
    pub person: Person,
    pub skills: Vec<Skill>,
    pub experiences: Vec<Experience>,
    pub stats: ProfileStats,
    pub last_updated: DateTime<Utc>,
}

impl CanonicalProfile {
    /// True when there is nothing worth rendering: no skills and no person name.
    pub fn is_empty_state(&self) -> bool {
        self.skills.is_empty() && self.person.name == UNKNOWN_NAME
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub name: String,
    pub username: String,
    pub professional_headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_thumbnail: Option<String>,
    pub verified: bool,
    pub is_test: bool,
    /// Profile completion ratio in `[0, 1]`.
    pub completion: f64,
    pub member_since: DateTime<Utc>,
    pub links: Vec<Link>,
    pub theme: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    Linkedin,
    Github,
    Twitter,
    Portfolio,
    Website,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub link_type: LinkType,
    pub verified: bool,
}

/// Provenance of a merged skill entry; also its merge precedence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkillSource {
    Explicit,
    Experience,
    Language,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    /// Ordinal proficiency, 1..=5.
    pub proficiency: u8,
    /// Synthetic percentile, 1..=100.
    pub percentile: u8,
    pub source: SkillSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub recommendations: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceType {
    Job,
    Education,
    Project,
    Award,
    Publication,
}

impl ExperienceType {
    /// Maps an upstream category tag. Unrecognized tags are treated as jobs.
    pub fn from_category(category: &str) -> Self {
        match category.trim().to_lowercase().as_str() {
            "jobs" => ExperienceType::Job,
            "education" => ExperienceType::Education,
            "projects" => ExperienceType::Project,
            "awards" => ExperienceType::Award,
            "publications" => ExperienceType::Publication,
            _ => ExperienceType::Job,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartialDate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl PartialDate {
    pub fn from_parts(month: Option<i32>, year: Option<i32>) -> Option<Self> {
        if month.is_none() && year.is_none() {
            return None;
        }
        Some(Self { month, year })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    #[serde(rename = "type")]
    pub experience_type: ExperienceType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub responsibilities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<PartialDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<PartialDate>,
    pub current: bool,
    pub highlighted: bool,
    pub skills: Vec<String>,
    /// Opaque upstream media objects, passed through untouched.
    pub media: Vec<Value>,
    pub verifications: u32,
    pub recommendations: u32,
}

impl Experience {
    pub fn end_year(&self) -> Option<i32> {
        self.end_date.and_then(|d| d.year)
    }

    pub fn start_year(&self) -> Option<i32> {
        self.start_date.and_then(|d| d.year)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub total_experiences: usize,
    pub total_skills: usize,
    /// `person.completion * 100`, rounded, 0..=100.
    pub completion_percentage: u8,
    /// Not computed; always 0.
    pub profile_views: u32,
    /// Not computed; always 0.
    pub total_connections: u32,
}
