//! User-supplied comparison files: `{ "username": ..., "skills": [...] }`.
//!
//! This shape is looser than the canonical profile and is only used for local
//! comparison, so validation is limited to type and presence checks.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::compare::ComparableSkill;

/// Largest accepted import body, in bytes.
pub const MAX_IMPORT_BYTES: usize = 1024 * 1024;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("File too large: {size} bytes exceeds the 1 MiB limit")]
    TooLarge { size: usize },

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid genome format. Expected {{username, skills}}")]
    InvalidFormat,

    #[error("Invalid skills format: entry {index} needs a name and numeric proficiency and percentile")]
    InvalidSkill { index: usize },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImportedGenome {
    pub username: String,
    pub skills: Vec<ComparableSkill>,
}

fn parse_skill(value: &Value) -> Option<ComparableSkill> {
    let name = value
        .get("name")?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())?;
    Some(ComparableSkill {
        name: name.to_string(),
        proficiency: value.get("proficiency")?.as_f64()?,
        percentile: value.get("percentile")?.as_f64()?,
    })
}

/// Validates an import body and keeps at most `max_skills` skills.
pub fn parse_import(bytes: &[u8], max_skills: usize) -> Result<ImportedGenome, ImportError> {
    if bytes.len() > MAX_IMPORT_BYTES {
        return Err(ImportError::TooLarge { size: bytes.len() });
    }
    let document: Value = serde_json::from_slice(bytes)?;

    let username = document
        .get("username")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ImportError::InvalidFormat)?;
    let raw_skills = document
        .get("skills")
        .and_then(|v| v.as_array())
        .ok_or(ImportError::InvalidFormat)?;

    let mut skills = raw_skills
        .iter()
        .enumerate()
        .map(|(index, v)| parse_skill(v).ok_or(ImportError::InvalidSkill { index }))
        .collect::<Result<Vec<_>, _>>()?;
    skills.truncate(max_skills);

    Ok(ImportedGenome {
        username: username.to_string(),
        skills,
    })
}
