//! Upstream profile document as returned by the genome bios endpoint.
//!
//! The upstream payload is only partially trusted: any field may be missing or
//! carry the wrong JSON type. Every field here decodes leniently: a scalar with
//! the wrong type becomes `None`, and arrays silently drop elements that fail
//! to decode, so a single malformed field never rejects the document.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfileDocument {
    #[serde(default, deserialize_with = "lenient")]
    pub person: Option<RawPerson>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub strengths: Vec<RawStrength>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub experiences: Vec<RawExperience>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub languages: Vec<RawLanguage>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub jobs: Vec<RawExperience>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub education: Vec<RawExperience>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub projects: Vec<RawExperience>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub awards: Vec<RawExperience>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub publications: Vec<RawExperience>,
    #[serde(default, deserialize_with = "lenient")]
    pub stats: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPerson {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub public_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub professional_headline: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub summary_of_bio: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub location: Option<RawLocation>,
    #[serde(default, deserialize_with = "lenient")]
    pub picture: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub picture_thumbnail: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub verified: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_test: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub completion: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub created: Option<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub links: Vec<RawLink>,
    #[serde(default, deserialize_with = "lenient")]
    pub theme: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLocation {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub short_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub country_code: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLink {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<FlexId>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub address: Option<String>,
}

/// An explicit skill record ("strength").
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStrength {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub code: Option<FlexId>,
    #[serde(default, deserialize_with = "lenient")]
    pub proficiency: Option<RawProficiency>,
    #[serde(default, deserialize_with = "lenient")]
    pub recommendations: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLanguage {
    #[serde(default, deserialize_with = "lenient")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub proficiency: Option<RawProficiency>,
    #[serde(default, deserialize_with = "lenient")]
    pub fluency: Option<String>,
}

/// A skill mention embedded in an experience record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSkillMention {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub proficiency: Option<RawProficiency>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExperience {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<FlexId>,
    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub organizations: Vec<RawOrganization>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub skills: Vec<RawSkillMention>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub strengths: Vec<RawSkillMention>,
    #[serde(default, deserialize_with = "lenient")]
    pub from_month: Option<FlexNumber>,
    #[serde(default, deserialize_with = "lenient")]
    pub from_year: Option<FlexNumber>,
    #[serde(default, deserialize_with = "lenient")]
    pub to_month: Option<FlexNumber>,
    #[serde(default, deserialize_with = "lenient")]
    pub to_year: Option<FlexNumber>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub responsibilities: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub additional_info: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub highlighted: Option<bool>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub media: Vec<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub verifications: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub recommendations: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrganization {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<FlexId>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub picture: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub public_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub website: Option<String>,
}

/// Proficiency as the upstream sends it: a 1–5 number or a free-text tier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawProficiency {
    Numeric(f64),
    Text(String),
}

/// Identifier that may arrive as a JSON string or number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FlexId {
    Text(String),
    Number(i64),
}

impl FlexId {
    pub fn into_string(self) -> String {
        match self {
            FlexId::Text(s) => s,
            FlexId::Number(n) => n.to_string(),
        }
    }
}

/// Month/year field that may arrive as `"2021"` or `2021`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FlexNumber {
    Number(i64),
    Text(String),
}

impl FlexNumber {
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            FlexNumber::Number(n) => i32::try_from(*n).ok(),
            FlexNumber::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Whether the upstream sent a meaningful value, parseable or not.
    /// `0` and blank strings count as unset.
    pub fn is_set(&self) -> bool {
        match self {
            FlexNumber::Number(n) => *n != 0,
            FlexNumber::Text(s) => !s.trim().is_empty(),
        }
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}
