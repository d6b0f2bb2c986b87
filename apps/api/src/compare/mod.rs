//! Side-by-side views over two skill sets: the radar chart series and the
//! common-skill comparison. Either side may come from a fetched profile or
//! from a user-supplied import file.

pub mod comparison;
pub mod handlers;
pub mod import;
pub mod radar;

use serde::{Deserialize, Serialize};

use crate::genome::models::Skill;

/// The minimal per-skill shape both sides of a comparison share.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparableSkill {
    pub name: String,
    pub proficiency: f64,
    pub percentile: f64,
}

impl From<&Skill> for ComparableSkill {
    fn from(skill: &Skill) -> Self {
        Self {
            name: skill.name.clone(),
            proficiency: f64::from(skill.proficiency),
            percentile: f64::from(skill.percentile),
        }
    }
}

pub fn comparable(skills: &[Skill]) -> Vec<ComparableSkill> {
    skills.iter().map(ComparableSkill::from).collect()
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
