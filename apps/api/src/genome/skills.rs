//! Skill aggregation: merges explicit strengths, experience-embedded skills and
//! declared languages into one deduplicated, ranked skill list.
//!
//! Precedence is an ordered list of passes over one keyed accumulator:
//!
//! | pass       | policy            |
//! |------------|-------------------|
//! | explicit   | always overwrite  |
//! | experience | insert if absent  |
//! | language   | insert if absent  |
//!
//! Keys are the trimmed, lowercased skill name. An overwritten entry keeps its
//! original position, so ties in the final sort resolve by first insertion.

use std::collections::HashMap;

use rand::Rng;

use crate::genome::models::{Skill, SkillSource};
use crate::genome::percentile::PercentileEngine;
use crate::genome::proficiency::{normalize_proficiency, normalize_text};
use crate::genome::raw::{FlexId, RawExperience, RawLanguage, RawStrength};

/// Upper bound on merged skills; the chart views lose legibility past this.
pub const DEFAULT_MAX_SKILLS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergePolicy {
    Overwrite,
    InsertIfAbsent,
}

struct Candidate<'a> {
    name: &'a str,
    proficiency: u8,
    code: Option<String>,
    recommendations: u32,
}

struct SourcePass<'a> {
    source: SkillSource,
    policy: MergePolicy,
    candidates: Vec<Candidate<'a>>,
}

fn trimmed_name(name: Option<&String>) -> Option<&str> {
    name.map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn explicit_pass(strengths: &[RawStrength]) -> SourcePass<'_> {
    SourcePass {
        source: SkillSource::Explicit,
        policy: MergePolicy::Overwrite,
        candidates: strengths
            .iter()
            .filter_map(|s| {
                Some(Candidate {
                    name: trimmed_name(s.name.as_ref())?,
                    proficiency: normalize_proficiency(s.proficiency.as_ref()),
                    code: s.code.clone().map(FlexId::into_string),
                    recommendations: s.recommendations.unwrap_or(0),
                })
            })
            .collect(),
    }
}

fn experience_pass(experiences: &[RawExperience]) -> SourcePass<'_> {
    SourcePass {
        source: SkillSource::Experience,
        policy: MergePolicy::InsertIfAbsent,
        candidates: experiences
            .iter()
            .flat_map(|exp| exp.skills.iter())
            .filter_map(|s| {
                Some(Candidate {
                    name: trimmed_name(s.name.as_ref())?,
                    proficiency: normalize_proficiency(s.proficiency.as_ref()),
                    code: None,
                    recommendations: 0,
                })
            })
            .collect(),
    }
}

fn language_pass(languages: &[RawLanguage]) -> SourcePass<'_> {
    SourcePass {
        source: SkillSource::Language,
        policy: MergePolicy::InsertIfAbsent,
        candidates: languages
            .iter()
            .filter_map(|l| {
                Some(Candidate {
                    name: trimmed_name(l.language.as_ref())?,
                    // Upstream sends either a proficiency or only a fluency label.
                    proficiency: match (&l.proficiency, &l.fluency) {
                        (None, Some(fluency)) => normalize_text(fluency),
                        (proficiency, _) => normalize_proficiency(proficiency.as_ref()),
                    },
                    code: None,
                    recommendations: 0,
                })
            })
            .collect(),
    }
}

#[derive(Default)]
struct SkillAccumulator {
    skills: Vec<Skill>,
    index: HashMap<String, usize>,
}

impl SkillAccumulator {
    fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    fn put(&mut self, key: String, skill: Skill) {
        match self.index.get(&key) {
            Some(&i) => self.skills[i] = skill,
            None => {
                self.index.insert(key, self.skills.len());
                self.skills.push(skill);
            }
        }
    }
}

pub struct SkillAggregator<'e> {
    engine: &'e PercentileEngine,
    max_skills: usize,
}

impl<'e> SkillAggregator<'e> {
    pub fn new(engine: &'e PercentileEngine, max_skills: usize) -> Self {
        Self { engine, max_skills }
    }

    pub fn aggregate<R: Rng>(
        &self,
        strengths: &[RawStrength],
        experiences: &[RawExperience],
        languages: &[RawLanguage],
        rng: &mut R,
    ) -> Vec<Skill> {
        let passes = [
            explicit_pass(strengths),
            experience_pass(experiences),
            language_pass(languages),
        ];

        let mut acc = SkillAccumulator::default();
        for pass in passes {
            for candidate in pass.candidates {
                let key = candidate.name.to_lowercase();
                if pass.policy == MergePolicy::InsertIfAbsent && acc.contains(&key) {
                    continue;
                }
                let skill = self.score(pass.source, candidate, rng);
                acc.put(key, skill);
            }
        }

        let mut skills = acc.skills;
        skills.sort_by(|a, b| b.proficiency.cmp(&a.proficiency));
        skills.truncate(self.max_skills);
        skills
    }

    fn score<R: Rng>(&self, source: SkillSource, candidate: Candidate<'_>, rng: &mut R) -> Skill {
        let proficiency = candidate.proficiency;
        let percentile = match source {
            SkillSource::Language => {
                self.engine
                    .language_percentile(candidate.name, f64::from(proficiency), rng)
            }
            _ => self
                .engine
                .percentile(candidate.name, f64::from(proficiency), rng),
        };
        Skill {
            name: candidate.name.to_string(),
            proficiency,
            percentile,
            source,
            code: candidate.code,
            recommendations: candidate.recommendations,
        }
    }
}
