//! Static directory of sample profiles, used for autocomplete when the
//! upstream search is unavailable.

pub mod handlers;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::genome::models::{NO_HEADLINE, UNKNOWN_LOCATION, UNKNOWN_NAME};

pub const MIN_QUERY_LEN: usize = 2;
pub const MAX_DIRECTORY_RESULTS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    pub username: String,
    pub name: String,
    pub professional_headline: String,
    pub location: String,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion: Option<f64>,
}

impl DirectoryEntry {
    fn sample(username: &str, name: &str, headline: &str, location: &str, verified: bool) -> Self {
        Self {
            username: username.to_string(),
            name: name.to_string(),
            professional_headline: headline.to_string(),
            location: location.to_string(),
            verified,
            completion: None,
        }
    }

    /// Builds an entry from one upstream search hit. Hits without a username
    /// or public id are discarded.
    pub fn from_search_result(person: &Value) -> Option<Self> {
        let text = |key: &str| {
            person
                .get(key)
                .and_then(|v| v.as_str())
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };
        let username = text("username").or_else(|| text("publicId"))?;

        Some(Self {
            username: username.to_string(),
            name: text("name")
                .or_else(|| text("professionalHeadline"))
                .unwrap_or(UNKNOWN_NAME)
                .to_string(),
            professional_headline: text("professionalHeadline")
                .unwrap_or(NO_HEADLINE)
                .to_string(),
            location: person
                .get("location")
                .and_then(|l| l.get("name"))
                .and_then(|v| v.as_str())
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(UNKNOWN_LOCATION)
                .to_string(),
            verified: person
                .get("verified")
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            completion: Some(
                person
                    .get("completion")
                    .and_then(|v| v.as_f64())
                    .unwrap_or(0.0),
            ),
        })
    }
}

pub fn all_users() -> Vec<DirectoryEntry> {
    vec![
        DirectoryEntry::sample("john", "John Galac", "Creative graphic / web designer", "United States", true),
        DirectoryEntry::sample("diego", "Diego Fernandes", "Full Stack Developer", "Brazil", true),
        DirectoryEntry::sample("laura", "Laura Daniela Peña Castro", "UX Designer", "Colombia", false),
        DirectoryEntry::sample("jane", "Jane Pitt", "Product Designer", "Canada", true),
        DirectoryEntry::sample("carlos", "Carlos Mendez", "Backend Developer", "Argentina", false),
        DirectoryEntry::sample("renan", "Renan Silva", "Software Developer", "Brazil", true),
        DirectoryEntry::sample("maria", "Maria Rodriguez", "Data Scientist", "Spain", true),
        DirectoryEntry::sample("alex", "Alex Thompson", "DevOps Engineer", "United Kingdom", false),
        DirectoryEntry::sample("sofia", "Sofia Chen", "Mobile Developer", "Singapore", true),
        DirectoryEntry::sample("lucas", "Lucas Santos", "Frontend Developer", "Portugal", false),
        DirectoryEntry::sample("emma", "Emma Wilson", "Product Manager", "Australia", true),
        DirectoryEntry::sample("david", "David Kim", "Machine Learning Engineer", "South Korea", true),
        DirectoryEntry::sample("ana", "Ana García", "UI/UX Designer", "Mexico", false),
        DirectoryEntry::sample("marco", "Marco Rossi", "Backend Engineer", "Italy", true),
        DirectoryEntry::sample("lisa", "Lisa Anderson", "Technical Writer", "Sweden", false),
        DirectoryEntry::sample("kevin", "Kevin O'Connor", "Cloud Architect", "Ireland", true),
        DirectoryEntry::sample("yuki", "Yuki Tanaka", "Game Developer", "Japan", false),
        DirectoryEntry::sample("pierre", "Pierre Dubois", "Security Engineer", "France", true),
        DirectoryEntry::sample("priya", "Priya Sharma", "Data Analyst", "India", false),
        DirectoryEntry::sample("hans", "Hans Mueller", "Software Architect", "Germany", true),
    ]
}

/// Case-insensitive substring search over username, name and headline.
/// Username-prefix hits rank first, then name-prefix hits, then by username.
pub fn search_directory(entries: &[DirectoryEntry], query: &str) -> Vec<DirectoryEntry> {
    let query = query.trim().to_lowercase();
    if query.chars().count() < MIN_QUERY_LEN {
        return Vec::new();
    }

    let mut hits: Vec<&DirectoryEntry> = entries
        .iter()
        .filter(|e| {
            e.username.to_lowercase().contains(&query)
                || e.name.to_lowercase().contains(&query)
                || e.professional_headline.to_lowercase().contains(&query)
        })
        .collect();

    hits.sort_by(|a, b| {
        let username_prefix = |e: &DirectoryEntry| e.username.to_lowercase().starts_with(&query);
        let name_prefix = |e: &DirectoryEntry| e.name.to_lowercase().starts_with(&query);
        username_prefix(b)
            .cmp(&username_prefix(a))
            .then_with(|| name_prefix(b).cmp(&name_prefix(a)))
            .then_with(|| a.username.cmp(&b.username))
    });

    hits.into_iter()
        .take(MAX_DIRECTORY_RESULTS)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_short_query_returns_nothing() {
        assert!(search_directory(&all_users(), "a").is_empty());
        assert!(search_directory(&all_users(), "  j ").is_empty());
    }

    #[test]
    fn test_username_prefix_ranks_first() {
        let hits = search_directory(&all_users(), "da");
        // "david" starts with the query; "diego" and "laura" only contain it elsewhere.
        assert_eq!(hits[0].username, "david");
        assert!(hits.iter().any(|h| h.username == "laura"));
    }

    #[test]
    fn test_headline_match() {
        let hits = search_directory(&all_users(), "DevOps");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].username, "alex");
    }

    #[test]
    fn test_results_are_capped() {
        let hits = search_directory(&all_users(), "er");
        assert!(hits.len() <= MAX_DIRECTORY_RESULTS);
    }

    #[test]
    fn test_search_result_mapping() {
        let entry = DirectoryEntry::from_search_result(&json!({
            "publicId": "renan",
            "professionalHeadline": "Dev",
            "location": { "name": "Brazil" },
            "verified": true
        }))
        .unwrap();
        assert_eq!(entry.username, "renan");
        assert_eq!(entry.name, "Dev");
        assert_eq!(entry.location, "Brazil");
        assert!(entry.verified);
        assert_eq!(entry.completion, Some(0.0));

        assert!(DirectoryEntry::from_search_result(&json!({ "name": "no id" })).is_none());
    }
}
