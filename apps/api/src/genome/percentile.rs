//! Percentile engine: maps (skill, proficiency) to a synthetic 1–100 percentile.
//!
//! Each known skill has ten ascending proficiency breakpoints; the first
//! breakpoint at or above the input proficiency selects a fixed percentile
//! threshold. Popular skills carry higher breakpoints, so the same proficiency
//! ranks lower for them than for niche ones. A small uniform jitter is added on
//! top; pass a seeded RNG (or build the engine with zero jitter) when
//! reproducibility matters.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use serde::Serialize;
use thiserror::Error;

pub const BREAKPOINT_COUNT: usize = 10;
pub const PERCENTILE_THRESHOLDS: [f64; BREAKPOINT_COUNT] =
    [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 95.0];
/// Half-width of the uniform jitter applied to every percentile.
pub const DEFAULT_JITTER: f64 = 2.0;
/// Suffix appended to language names so they never hit a technical skill's row.
pub const LANGUAGE_NAMESPACE_SUFFIX: &str = "_language";
/// Key of the fallback row in JSON reference tables.
pub const DEFAULT_TABLE_KEY: &str = "_default";

pub type Distribution = [f64; BREAKPOINT_COUNT];

const DEFAULT_DISTRIBUTION: Distribution = [1.0, 2.0, 2.7, 3.3, 3.8, 4.2, 4.5, 4.7, 4.9, 5.0];

const BUILTIN_DISTRIBUTIONS: &[(&str, Distribution)] = &[
    ("javascript", [1.2, 2.1, 2.8, 3.4, 4.0, 4.3, 4.6, 4.8, 4.9, 5.0]),
    ("python", [1.1, 2.0, 2.7, 3.3, 3.9, 4.2, 4.5, 4.7, 4.9, 5.0]),
    ("java", [1.0, 1.9, 2.6, 3.2, 3.8, 4.1, 4.4, 4.6, 4.8, 5.0]),
    ("typescript", [1.3, 2.2, 2.9, 3.5, 4.1, 4.4, 4.7, 4.9, 4.95, 5.0]),
    ("csharp", [1.1, 2.0, 2.7, 3.3, 3.9, 4.2, 4.5, 4.7, 4.9, 5.0]),
    ("cpp", [0.9, 1.8, 2.5, 3.1, 3.7, 4.0, 4.3, 4.5, 4.7, 4.9]),
    ("cplusplus", [0.9, 1.8, 2.5, 3.1, 3.7, 4.0, 4.3, 4.5, 4.7, 4.9]),
    ("go", [1.4, 2.3, 3.0, 3.6, 4.2, 4.5, 4.8, 4.9, 4.95, 5.0]),
    ("rust", [1.5, 2.4, 3.1, 3.7, 4.3, 4.6, 4.8, 4.9, 4.95, 5.0]),
    ("php", [1.0, 1.9, 2.6, 3.2, 3.8, 4.1, 4.4, 4.6, 4.8, 5.0]),
    ("ruby", [1.2, 2.1, 2.8, 3.4, 4.0, 4.3, 4.6, 4.8, 4.9, 5.0]),
    ("react", [1.3, 2.2, 2.9, 3.5, 4.1, 4.4, 4.7, 4.9, 4.95, 5.0]),
    ("angular", [1.1, 2.0, 2.7, 3.3, 3.9, 4.2, 4.5, 4.7, 4.9, 5.0]),
    ("vue", [1.4, 2.3, 3.0, 3.6, 4.2, 4.5, 4.8, 4.9, 4.95, 5.0]),
    ("nodejs", [1.2, 2.1, 2.8, 3.4, 4.0, 4.3, 4.6, 4.8, 4.9, 5.0]),
    ("nextjs", [1.5, 2.4, 3.1, 3.7, 4.3, 4.6, 4.8, 4.9, 4.95, 5.0]),
    ("sql", [1.0, 1.9, 2.6, 3.2, 3.8, 4.1, 4.4, 4.6, 4.8, 5.0]),
    ("postgresql", [1.1, 2.0, 2.7, 3.3, 3.9, 4.2, 4.5, 4.7, 4.9, 5.0]),
    ("mysql", [1.0, 1.9, 2.6, 3.2, 3.8, 4.1, 4.4, 4.6, 4.8, 5.0]),
    ("mongodb", [1.2, 2.1, 2.8, 3.4, 4.0, 4.3, 4.6, 4.8, 4.9, 5.0]),
    ("redis", [1.3, 2.2, 2.9, 3.5, 4.1, 4.4, 4.7, 4.9, 4.95, 5.0]),
    ("aws", [1.1, 2.0, 2.7, 3.3, 3.9, 4.2, 4.5, 4.7, 4.9, 5.0]),
    ("azure", [1.2, 2.1, 2.8, 3.4, 4.0, 4.3, 4.6, 4.8, 4.9, 5.0]),
    ("docker", [1.2, 2.1, 2.8, 3.4, 4.0, 4.3, 4.6, 4.8, 4.9, 5.0]),
    ("kubernetes", [1.4, 2.3, 3.0, 3.6, 4.2, 4.5, 4.8, 4.9, 4.95, 5.0]),
    ("terraform", [1.5, 2.4, 3.1, 3.7, 4.3, 4.6, 4.8, 4.9, 4.95, 5.0]),
    ("figma", [1.3, 2.2, 2.9, 3.5, 4.1, 4.4, 4.7, 4.9, 4.95, 5.0]),
    ("photoshop", [1.1, 2.0, 2.7, 3.3, 3.9, 4.2, 4.5, 4.7, 4.9, 5.0]),
    ("uiux", [1.2, 2.1, 2.8, 3.4, 4.0, 4.3, 4.6, 4.8, 4.9, 5.0]),
];

#[derive(Debug, Error)]
pub enum TableError {
    #[error("reference table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("reference table has no '_default' distribution")]
    MissingDefault,

    #[error("distribution '{skill}' has {found} breakpoints, expected 10")]
    WrongLength { skill: String, found: usize },

    #[error("distribution '{skill}' has breakpoint {value} outside [0, 5]")]
    OutOfRange { skill: String, value: f64 },

    #[error("distribution '{skill}' is not ascending")]
    NotAscending { skill: String },
}

/// Immutable skill → breakpoint table. Built once at startup and shared by
/// every engine through an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    distributions: HashMap<String, Distribution>,
    fallback: Distribution,
}

impl ReferenceTable {
    pub fn builtin() -> Self {
        Self {
            distributions: BUILTIN_DISTRIBUTIONS
                .iter()
                .map(|(k, d)| (k.to_string(), *d))
                .collect(),
            fallback: DEFAULT_DISTRIBUTION,
        }
    }

    /// Builds a table from arbitrary rows. Keys are normalized; rows are validated.
    pub fn new(
        rows: impl IntoIterator<Item = (String, Vec<f64>)>,
        fallback: Vec<f64>,
    ) -> Result<Self, TableError> {
        let fallback = validate_distribution(DEFAULT_TABLE_KEY, fallback)?;
        let mut distributions = HashMap::new();
        for (skill, values) in rows {
            let distribution = validate_distribution(&skill, values)?;
            distributions.insert(skill_key(&skill), distribution);
        }
        Ok(Self {
            distributions,
            fallback,
        })
    }

    /// Parses `{"<skill>": [10 numbers], ..., "_default": [10 numbers]}`.
    pub fn from_json_str(json: &str) -> Result<Self, TableError> {
        let mut rows: HashMap<String, Vec<f64>> = serde_json::from_str(json)?;
        let fallback = rows
            .remove(DEFAULT_TABLE_KEY)
            .ok_or(TableError::MissingDefault)?;
        Self::new(rows, fallback)
    }

    pub fn len(&self) -> usize {
        self.distributions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distributions.is_empty()
    }

    pub fn distribution(&self, skill_name: &str) -> &Distribution {
        self.distributions
            .get(&skill_key(skill_name))
            .unwrap_or(&self.fallback)
    }
}

impl Default for ReferenceTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_distribution(skill: &str, values: Vec<f64>) -> Result<Distribution, TableError> {
    let found = values.len();
    let distribution: Distribution = values.try_into().map_err(|_| TableError::WrongLength {
        skill: skill.to_string(),
        found,
    })?;
    if let Some(&value) = distribution.iter().find(|v| !(0.0..=5.0).contains(*v)) {
        return Err(TableError::OutOfRange {
            skill: skill.to_string(),
            value,
        });
    }
    if distribution.windows(2).any(|w| w[1] < w[0]) {
        return Err(TableError::NotAscending {
            skill: skill.to_string(),
        });
    }
    Ok(distribution)
}

/// Lookup key for a skill name: lowercase, drop whitespace/hyphens/periods,
/// spell out `+` and `#`, then drop anything that is not a word character.
pub fn skill_key(skill_name: &str) -> String {
    let mut key = String::with_capacity(skill_name.len());
    for c in skill_name.to_lowercase().chars() {
        match c {
            '+' => key.push_str("plus"),
            '#' => key.push_str("sharp"),
            c if c.is_ascii_alphanumeric() || c == '_' => key.push(c),
            _ => {}
        }
    }
    key
}

/// Presentation tier of a percentile.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PercentileTier {
    Low,
    Medium,
    High,
    Expert,
}

impl PercentileTier {
    pub fn from_percentile(percentile: f64) -> Self {
        match percentile {
            p if p >= 96.0 => PercentileTier::Expert,
            p if p >= 80.0 => PercentileTier::High,
            p if p >= 50.0 => PercentileTier::Medium,
            _ => PercentileTier::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PercentileTier::Expert => "Expert",
            PercentileTier::High => "High",
            PercentileTier::Medium => "Above Average",
            PercentileTier::Low => "Below Average",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PercentileEngine {
    table: Arc<ReferenceTable>,
    jitter: f64,
}

impl PercentileEngine {
    pub fn new(table: Arc<ReferenceTable>, jitter: f64) -> Self {
        Self {
            table,
            jitter: jitter.max(0.0),
        }
    }

    /// Engine with jitter disabled; every call is deterministic.
    pub fn deterministic(table: Arc<ReferenceTable>) -> Self {
        Self::new(table, 0.0)
    }

    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }

    /// Jitter-free percentile before rounding, in `[10, 100]`.
    pub fn base_percentile(&self, skill_name: &str, proficiency: f64) -> f64 {
        let distribution = self.table.distribution(skill_name);
        let proficiency = if proficiency.is_nan() {
            0.0
        } else {
            proficiency.clamp(0.0, 5.0)
        };

        distribution
            .iter()
            .position(|&bp| proficiency <= bp)
            .map(|i| PERCENTILE_THRESHOLDS[i])
            .unwrap_or_else(|| {
                let last = distribution[BREAKPOINT_COUNT - 1];
                (95.0 + (proficiency - last) * 10.0).min(100.0)
            })
    }

    /// Final 1..=100 percentile including jitter drawn from `rng`.
    pub fn percentile<R: Rng>(&self, skill_name: &str, proficiency: f64, rng: &mut R) -> u8 {
        let base = self.base_percentile(skill_name, proficiency);
        let jitter = if self.jitter > 0.0 {
            rng.gen_range(-self.jitter..=self.jitter)
        } else {
            0.0
        };
        (base + jitter).round().clamp(1.0, 100.0) as u8
    }

    /// Percentile for a spoken language, looked up in its own namespace.
    pub fn language_percentile<R: Rng>(
        &self,
        language: &str,
        proficiency: f64,
        rng: &mut R,
    ) -> u8 {
        let namespaced = format!("{language}{LANGUAGE_NAMESPACE_SUFFIX}");
        self.percentile(&namespaced, proficiency, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine() -> PercentileEngine {
        PercentileEngine::deterministic(Arc::new(ReferenceTable::builtin()))
    }

    #[test]
    fn test_skill_key_normalization() {
        assert_eq!(skill_key("Node.js"), "nodejs");
        assert_eq!(skill_key("C#"), "csharp");
        assert_eq!(skill_key("C++"), "cplusplus");
        assert_eq!(skill_key("UI/UX"), "uiux");
        assert_eq!(skill_key("  Next-JS "), "nextjs");
        assert_eq!(skill_key("español_language"), "espaol_language");
    }

    #[test]
    fn test_builtin_table_has_expected_rows() {
        let table = ReferenceTable::builtin();
        assert!(table.len() >= 25);
        assert_eq!(table.distribution("Rust")[0], 1.5);
        assert_eq!(table.distribution("Cobol"), &DEFAULT_DISTRIBUTION);
    }

    #[test]
    fn test_first_breakpoint_at_or_above_selects_threshold() {
        let e = engine();
        // rust: [1.5, 2.4, 3.1, 3.7, 4.3, 4.6, 4.8, 4.9, 4.95, 5.0]
        assert_eq!(e.base_percentile("Rust", 1.0), 10.0);
        assert_eq!(e.base_percentile("Rust", 1.5), 10.0);
        assert_eq!(e.base_percentile("Rust", 3.0), 30.0);
        assert_eq!(e.base_percentile("Rust", 4.0), 50.0);
        assert_eq!(e.base_percentile("Rust", 5.0), 95.0);
    }

    #[test]
    fn test_hot_skill_ranks_lower_than_commodity() {
        let e = engine();
        assert!(e.base_percentile("Rust", 4.0) < e.base_percentile("Java", 4.0));
    }

    #[test]
    fn test_beyond_last_breakpoint_extrapolates() {
        let e = engine();
        // cpp ends at 4.9: 95 + (5.0 - 4.9) * 10 = 96
        let p = e.base_percentile("cpp", 5.0);
        assert!((p - 96.0).abs() < 1e-9, "{p}");
        // input above 5 is clamped first
        let p = e.base_percentile("cpp", 9.0);
        assert!((p - 96.0).abs() < 1e-9, "{p}");
    }

    #[test]
    fn test_monotonic_in_proficiency() {
        let e = engine();
        for skill in ["rust", "python", "unknown-skill", "cpp"] {
            let mut prev = 0.0;
            for step in 0..=60 {
                let p = e.base_percentile(skill, step as f64 * 0.1);
                assert!(p >= prev, "{skill} at {step}: {p} < {prev}");
                prev = p;
            }
        }
    }

    #[test]
    fn test_jitter_stays_in_range_and_bounds() {
        let e = PercentileEngine::new(Arc::new(ReferenceTable::builtin()), DEFAULT_JITTER);
        let mut rng = StdRng::seed_from_u64(7);
        for step in 0..=50 {
            let prof = step as f64 * 0.1;
            let base = e.base_percentile("python", prof);
            let p = e.percentile("python", prof, &mut rng) as f64;
            assert!((1.0..=100.0).contains(&p));
            assert!((p - base).abs() <= DEFAULT_JITTER + 0.5, "{p} vs {base}");
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let e = PercentileEngine::new(Arc::new(ReferenceTable::builtin()), DEFAULT_JITTER);
        let a = e.percentile("go", 4.0, &mut StdRng::seed_from_u64(42));
        let b = e.percentile("go", 4.0, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_jitter_is_exact() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(engine().percentile("react", 3.0, &mut rng), 40);
    }

    #[test]
    fn test_language_namespace_uses_fallback_row() {
        let e = engine();
        let mut rng = StdRng::seed_from_u64(1);
        // "rust_language" is not a table row, so the default distribution applies.
        assert_eq!(e.language_percentile("Rust", 1.5, &mut rng), 20);
        assert_eq!(e.percentile("Rust", 1.5, &mut rng), 10);
    }

    #[test]
    fn test_table_from_json() {
        let json = r#"{
            "_default": [0.5, 1, 1.5, 2, 2.5, 3, 3.5, 4, 4.5, 5],
            "Node.js": [1, 1, 1, 1, 1, 1, 1, 1, 1, 1]
        }"#;
        let table = ReferenceTable::from_json_str(json).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.distribution("nodejs")[9], 1.0);
        assert_eq!(table.distribution("anything")[0], 0.5);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_default_only_table_is_empty() {
        let json = r#"{ "_default": [0.5, 1, 1.5, 2, 2.5, 3, 3.5, 4, 4.5, 5] }"#;
        let table = ReferenceTable::from_json_str(json).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.distribution("rust")[0], 0.5);
    }

    #[test]
    fn test_table_validation_errors() {
        let missing_default = r#"{"rust": [1,2,3,4,5,5,5,5,5,5]}"#;
        assert!(matches!(
            ReferenceTable::from_json_str(missing_default),
            Err(TableError::MissingDefault)
        ));

        let short = r#"{"_default": [1, 2, 3]}"#;
        assert!(matches!(
            ReferenceTable::from_json_str(short),
            Err(TableError::WrongLength { found: 3, .. })
        ));

        let descending = r#"{"_default": [5,4,3,2,1,1,1,1,1,1]}"#;
        assert!(matches!(
            ReferenceTable::from_json_str(descending),
            Err(TableError::NotAscending { .. })
        ));

        let out_of_range = r#"{"_default": [1,2,3,4,5,6,6,6,6,6]}"#;
        assert!(matches!(
            ReferenceTable::from_json_str(out_of_range),
            Err(TableError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_percentile_tiers() {
        assert_eq!(PercentileTier::from_percentile(97.0), PercentileTier::Expert);
        assert_eq!(PercentileTier::from_percentile(80.0), PercentileTier::High);
        assert_eq!(PercentileTier::from_percentile(50.0), PercentileTier::Medium);
        assert_eq!(PercentileTier::from_percentile(49.0), PercentileTier::Low);
        assert_eq!(PercentileTier::Medium.label(), "Above Average");
    }
}
