use std::collections::HashSet;

use serde::Serialize;

use crate::compare::{name_key, ComparableSkill};

/// Axes shown on the radar chart.
pub const RADAR_MAX_SKILLS: usize = 12;
/// Axis labels longer than this are cut and suffixed with `...`.
pub const RADAR_LABEL_MAX_CHARS: usize = 20;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RadarPoint {
    /// Axis label, possibly truncated.
    pub skill: String,
    pub full_name: String,
    /// Primary proficiency on the 0–5 axis; 0 when the primary lacks the skill.
    pub primary: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare: Option<f64>,
    pub primary_percentile: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_percentile: Option<f64>,
}

fn axis_label(name: &str) -> String {
    if name.chars().count() > RADAR_LABEL_MAX_CHARS {
        let cut: String = name.chars().take(RADAR_LABEL_MAX_CHARS).collect();
        format!("{cut}...")
    } else {
        name.to_string()
    }
}

fn find<'a>(skills: &'a [ComparableSkill], key: &str) -> Option<&'a ComparableSkill> {
    skills.iter().find(|s| name_key(&s.name) == key)
}

/// Chart series for one profile, optionally overlaid with a second.
///
/// Axes are the union of both skill lists (primary first), capped at
/// [`RADAR_MAX_SKILLS`], then ordered by primary proficiency descending.
pub fn build_radar(
    primary: &[ComparableSkill],
    compare: Option<&[ComparableSkill]>,
) -> Vec<RadarPoint> {
    let mut seen = HashSet::new();
    let axes: Vec<&str> = primary
        .iter()
        .chain(compare.unwrap_or_default())
        .map(|s| s.name.as_str())
        .filter(|name| seen.insert(name_key(name)))
        .take(RADAR_MAX_SKILLS)
        .collect();

    let mut points: Vec<RadarPoint> = axes
        .into_iter()
        .map(|name| {
            let key = name_key(name);
            let p = find(primary, &key);
            let c = compare.and_then(|skills| find(skills, &key));
            RadarPoint {
                skill: axis_label(name),
                full_name: name.to_string(),
                primary: p.map(|s| s.proficiency).unwrap_or(0.0),
                compare: c.map(|s| s.proficiency),
                primary_percentile: p.map(|s| s.percentile).unwrap_or(0.0),
                compare_percentile: c.map(|s| s.percentile),
            }
        })
        .collect();

    points.sort_by(|a, b| b.primary.total_cmp(&a.primary));
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(name: &str, proficiency: f64, percentile: f64) -> ComparableSkill {
        ComparableSkill {
            name: name.to_string(),
            proficiency,
            percentile,
        }
    }

    #[test]
    fn test_single_profile() {
        let primary = vec![skill("Go", 3.0, 40.0), skill("Rust", 5.0, 95.0)];
        let points = build_radar(&primary, None);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].full_name, "Rust");
        assert_eq!(points[0].primary_percentile, 95.0);
        assert!(points[0].compare.is_none());
    }

    #[test]
    fn test_union_with_compare() {
        let primary = vec![skill("Rust", 5.0, 95.0)];
        let compare = vec![skill("rust", 2.0, 20.0), skill("Figma", 4.0, 70.0)];
        let points = build_radar(&primary, Some(&compare));
        assert_eq!(points.len(), 2);

        assert_eq!(points[0].full_name, "Rust");
        assert_eq!(points[0].compare, Some(2.0));
        assert_eq!(points[0].compare_percentile, Some(20.0));

        assert_eq!(points[1].full_name, "Figma");
        assert_eq!(points[1].primary, 0.0);
        assert_eq!(points[1].primary_percentile, 0.0);
        assert_eq!(points[1].compare, Some(4.0));
    }

    #[test]
    fn test_axes_are_capped() {
        let primary: Vec<ComparableSkill> = (0..10)
            .map(|i| skill(&format!("p{i}"), 3.0, 50.0))
            .collect();
        let compare: Vec<ComparableSkill> = (0..10)
            .map(|i| skill(&format!("c{i}"), 3.0, 50.0))
            .collect();
        let points = build_radar(&primary, Some(&compare));
        assert_eq!(points.len(), RADAR_MAX_SKILLS);
        // every primary axis survives; only the first two compare axes fit
        assert!(points.iter().any(|p| p.full_name == "c1"));
        assert!(!points.iter().any(|p| p.full_name == "c2"));
    }

    #[test]
    fn test_long_labels_are_truncated() {
        let points = build_radar(
            &[skill("Distributed Systems Engineering", 4.0, 60.0)],
            None,
        );
        assert_eq!(points[0].skill, "Distributed Systems ...");
        assert_eq!(points[0].full_name, "Distributed Systems Engineering");
    }
}
