use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::compare::{name_key, ComparableSkill};
use crate::genome::percentile::PercentileTier;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    Name,
    #[default]
    Percentile,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Leader {
    Primary,
    Compare,
    Tie,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillComparison {
    pub name: String,
    pub primary_percentile: f64,
    pub compare_percentile: f64,
    pub difference: f64,
    pub leader: Leader,
    pub primary_tier: PercentileTier,
    pub compare_tier: PercentileTier,
    /// Display text for `primary_tier`, e.g. "Above Average".
    pub primary_tier_label: &'static str,
    pub compare_tier_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub common_skills: Vec<SkillComparison>,
    pub common_count: usize,
    pub average_percentile_diff: f64,
    pub stronger_skills: Vec<String>,
    pub weaker_skills: Vec<String>,
}

/// Compares the skills both sides share (names matched case-insensitively).
/// Rows follow `sort`; the primary side's spelling of each name is kept.
pub fn compare_skills(
    primary: &[ComparableSkill],
    other: &[ComparableSkill],
    sort: SortMode,
) -> ComparisonReport {
    let other_by_key: HashMap<String, &ComparableSkill> = other
        .iter()
        .rev()
        .map(|s| (name_key(&s.name), s))
        .collect();

    let mut common_skills: Vec<SkillComparison> = primary
        .iter()
        .filter_map(|p| {
            let o = other_by_key.get(&name_key(&p.name))?;
            let leader = if p.percentile > o.percentile {
                Leader::Primary
            } else if o.percentile > p.percentile {
                Leader::Compare
            } else {
                Leader::Tie
            };
            let primary_tier = PercentileTier::from_percentile(p.percentile);
            let compare_tier = PercentileTier::from_percentile(o.percentile);
            Some(SkillComparison {
                name: p.name.clone(),
                primary_percentile: p.percentile,
                compare_percentile: o.percentile,
                difference: (p.percentile - o.percentile).abs(),
                leader,
                primary_tier,
                compare_tier,
                primary_tier_label: primary_tier.label(),
                compare_tier_label: compare_tier.label(),
            })
        })
        .collect();

    match sort {
        SortMode::Name => common_skills.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        }),
        SortMode::Percentile => common_skills
            .sort_by(|a, b| b.primary_percentile.total_cmp(&a.primary_percentile)),
    }

    let common_count = common_skills.len();
    let average_percentile_diff = if common_count == 0 {
        0.0
    } else {
        common_skills.iter().map(|c| c.difference).sum::<f64>() / common_count as f64
    };

    let names_led_by = |leader: Leader| {
        common_skills
            .iter()
            .filter(|c| c.leader == leader)
            .map(|c| c.name.clone())
            .collect::<Vec<_>>()
    };
    let stronger_skills = names_led_by(Leader::Primary);
    let weaker_skills = names_led_by(Leader::Compare);

    ComparisonReport {
        common_skills,
        common_count,
        average_percentile_diff,
        stronger_skills,
        weaker_skills,
    }
}
