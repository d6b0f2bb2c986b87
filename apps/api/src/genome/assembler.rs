use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::genome::models::{CanonicalProfile, Experience, Person, ProfileStats, Skill};
use crate::genome::percentile::{PercentileEngine, ReferenceTable, DEFAULT_JITTER};
use crate::genome::raw::{RawPerson, RawProfileDocument};
use crate::genome::skills::{SkillAggregator, DEFAULT_MAX_SKILLS};
use crate::genome::transform::{transform_experiences, transform_person};

/// Builds a [`CanonicalProfile`] from one upstream document.
///
/// Assembly is synchronous and never fails. The only impurities are the
/// assembly timestamp and the percentile jitter, both of which can be supplied
/// by the caller through [`GenomeAssembler::assemble_at`].
#[derive(Debug, Clone)]
pub struct GenomeAssembler {
    engine: PercentileEngine,
    max_skills: usize,
}

impl GenomeAssembler {
    pub fn new(engine: PercentileEngine, max_skills: usize) -> Self {
        Self { engine, max_skills }
    }

    pub fn engine(&self) -> &PercentileEngine {
        &self.engine
    }

    pub fn max_skills(&self) -> usize {
        self.max_skills
    }

    pub fn assemble(&self, raw: &RawProfileDocument) -> CanonicalProfile {
        self.assemble_at(raw, Utc::now(), &mut rand::thread_rng())
    }

    pub fn assemble_at<R: Rng>(
        &self,
        raw: &RawProfileDocument,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> CanonicalProfile {
        let empty_person = RawPerson::default();
        let person = transform_person(raw.person.as_ref().unwrap_or(&empty_person), now);

        let skills = SkillAggregator::new(&self.engine, self.max_skills).aggregate(
            &raw.strengths,
            &raw.experiences,
            &raw.languages,
            rng,
        );

        // Category order is fixed before the date sort; it decides ties.
        let experiences = transform_experiences(
            raw.jobs
                .iter()
                .chain(&raw.education)
                .chain(&raw.projects)
                .chain(&raw.awards)
                .chain(&raw.publications),
        );

        let stats = compute_stats(&experiences, &skills, &person);

        CanonicalProfile {
            person,
            skills,
            experiences,
            stats,
            last_updated: now,
        }
    }
}

impl Default for GenomeAssembler {
    fn default() -> Self {
        Self::new(
            PercentileEngine::new(Arc::new(ReferenceTable::builtin()), DEFAULT_JITTER),
            DEFAULT_MAX_SKILLS,
        )
    }
}

pub fn compute_stats(experiences: &[Experience], skills: &[Skill], person: &Person) -> ProfileStats {
    ProfileStats {
        total_experiences: experiences.len(),
        total_skills: skills.len(),
        completion_percentage: (person.completion * 100.0).round().clamp(0.0, 100.0) as u8,
        profile_views: 0,
        total_connections: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    use crate::genome::models::{ExperienceType, SkillSource};

    fn assembler() -> GenomeAssembler {
        GenomeAssembler::new(
            PercentileEngine::deterministic(Arc::new(ReferenceTable::builtin())),
            DEFAULT_MAX_SKILLS,
        )
    }

    fn assemble(doc: serde_json::Value) -> CanonicalProfile {
        let raw: RawProfileDocument = serde_json::from_value(doc).unwrap();
        assembler().assemble_at(&raw, Utc::now(), &mut StdRng::seed_from_u64(11))
    }

    #[test]
    fn test_empty_document() {
        let profile = assemble(json!({ "person": {} }));
        assert!(profile.skills.is_empty());
        assert!(profile.experiences.is_empty());
        assert_eq!(profile.person.name, "Unknown");
        assert_eq!(profile.stats.total_skills, 0);
        assert_eq!(profile.stats.completion_percentage, 0);
        assert!(profile.is_empty_state());
    }

    #[test]
    fn test_missing_person_still_assembles() {
        let profile = assemble(json!({}));
        assert_eq!(profile.person.username, "unknown");
        assert_eq!(profile.person.professional_headline, "No headline");
    }

    #[test]
    fn test_completion_percentage() {
        let profile = assemble(json!({ "person": { "name": "A", "completion": 0.73 } }));
        assert_eq!(profile.stats.completion_percentage, 73);
        assert!(!profile.is_empty_state());
    }

    #[test]
    fn test_reserved_stats_are_zero() {
        let profile = assemble(json!({ "person": {} }));
        assert_eq!(profile.stats.profile_views, 0);
        assert_eq!(profile.stats.total_connections, 0);
    }

    #[test]
    fn test_full_document() {
        let now = Utc::now();
        let raw: RawProfileDocument = serde_json::from_value(json!({
            "person": { "name": "Renan", "publicId": "renan", "completion": 0.5 },
            "strengths": [
                { "name": "TypeScript", "proficiency": "expert", "recommendations": 3 },
                { "name": "Go", "proficiency": 5 }
            ],
            "experiences": [
                { "name": "Shop", "skills": [{ "name": "go", "proficiency": 1 }, { "name": "SQL" }] }
            ],
            "languages": [{ "language": "Portuguese", "proficiency": "native" }],
            "jobs": [{ "id": "j1", "category": "jobs", "name": "Engineer", "fromYear": "2018", "toYear": "2020" }],
            "education": [{ "id": "e1", "category": "education", "name": "BSc", "fromYear": "2014", "toYear": "2018" }],
            "projects": [{ "id": "p1", "category": "projects", "name": "Radar", "fromYear": "2023" }],
            "awards": [{ "id": "a1", "category": "awards" }]
        }))
        .unwrap();

        let profile = assembler().assemble_at(&raw, now, &mut StdRng::seed_from_u64(5));

        assert_eq!(profile.last_updated, now);
        let names: Vec<&str> = profile.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["TypeScript", "Go", "Portuguese", "SQL"]);
        assert_eq!(profile.skills[1].source, SkillSource::Explicit);
        assert_eq!(profile.skills[3].source, SkillSource::Experience);

        let ids: Vec<&str> = profile.experiences.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "j1", "e1"]);
        assert_eq!(profile.experiences[0].experience_type, ExperienceType::Project);
        assert!(profile.experiences[0].current);

        assert_eq!(profile.stats.total_experiences, 3);
        assert_eq!(profile.stats.total_skills, 4);
        assert_eq!(profile.stats.completion_percentage, 50);
    }

    #[test]
    fn test_serialized_contract_fields() {
        let profile = assemble(json!({
            "person": { "name": "A", "publicId": "a" },
            "strengths": [{ "name": "Rust", "proficiency": 4 }]
        }));
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["person"]["username"], "a");
        assert!(value["lastUpdated"].is_string());
        assert_eq!(value["stats"]["completionPercentage"], 0);
        assert_eq!(value["stats"]["profileViews"], 0);
        assert_eq!(value["skills"][0]["source"], "explicit");
        assert!(value["skills"][0]["percentile"].is_u64());
    }

    #[test]
    fn test_default_assembler_respects_bounds() {
        let raw: RawProfileDocument = serde_json::from_value(json!({
            "strengths": [{ "name": "Kubernetes", "proficiency": 5 }, { "name": "Cobol", "proficiency": 1 }]
        }))
        .unwrap();
        let profile = GenomeAssembler::default().assemble(&raw);
        for skill in &profile.skills {
            assert!((1..=100).contains(&skill.percentile));
            assert!((1..=5).contains(&skill.proficiency));
        }
    }
}
