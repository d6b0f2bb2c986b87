use crate::genome::raw::RawProficiency;

pub const MIN_PROFICIENCY: u8 = 1;
pub const MAX_PROFICIENCY: u8 = 5;
/// Neutral midpoint used for absent or unrecognized proficiency values.
pub const NEUTRAL_PROFICIENCY: u8 = 3;

/// Maps any upstream proficiency representation onto the 1..=5 ordinal scale.
/// Never fails: unknown vocabulary and absent values land on the midpoint.
pub fn normalize_proficiency(value: Option<&RawProficiency>) -> u8 {
    match value {
        Some(RawProficiency::Numeric(n)) => normalize_numeric(*n),
        Some(RawProficiency::Text(s)) => normalize_text(s),
        None => NEUTRAL_PROFICIENCY,
    }
}

pub fn normalize_numeric(value: f64) -> u8 {
    if value.is_nan() {
        return NEUTRAL_PROFICIENCY;
    }
    value
        .round()
        .clamp(f64::from(MIN_PROFICIENCY), f64::from(MAX_PROFICIENCY)) as u8
}

pub fn normalize_text(value: &str) -> u8 {
    match value.trim().to_lowercase().as_str() {
        "novice" | "beginner" => 1,
        "basic" | "elementary" => 2,
        "competent" | "intermediate" => 3,
        "proficient" | "advanced" => 4,
        "expert" | "native" | "fluent" => 5,
        _ => NEUTRAL_PROFICIENCY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawProficiency {
        RawProficiency::Text(s.to_string())
    }

    #[test]
    fn test_numeric_rounds_and_clamps() {
        assert_eq!(normalize_numeric(3.4), 3);
        assert_eq!(normalize_numeric(3.5), 4);
        assert_eq!(normalize_numeric(-7.0), 1);
        assert_eq!(normalize_numeric(0.2), 1);
        assert_eq!(normalize_numeric(42.0), 5);
        assert_eq!(normalize_numeric(f64::NAN), 3);
        assert_eq!(normalize_numeric(f64::INFINITY), 5);
    }

    #[test]
    fn test_text_tiers() {
        assert_eq!(normalize_proficiency(Some(&text("Novice"))), 1);
        assert_eq!(normalize_proficiency(Some(&text("beginner"))), 1);
        assert_eq!(normalize_proficiency(Some(&text("  elementary "))), 2);
        assert_eq!(normalize_proficiency(Some(&text("BASIC"))), 2);
        assert_eq!(normalize_proficiency(Some(&text("intermediate"))), 3);
        assert_eq!(normalize_proficiency(Some(&text("competent"))), 3);
        assert_eq!(normalize_proficiency(Some(&text("advanced"))), 4);
        assert_eq!(normalize_proficiency(Some(&text("proficient"))), 4);
        assert_eq!(normalize_proficiency(Some(&text("Expert"))), 5);
        assert_eq!(normalize_proficiency(Some(&text("native"))), 5);
        assert_eq!(normalize_proficiency(Some(&text("fluent"))), 5);
    }

    #[test]
    fn test_unrecognized_text_is_neutral() {
        assert_eq!(normalize_proficiency(Some(&text("master-of-none"))), 3);
        assert_eq!(normalize_proficiency(Some(&text(""))), 3);
    }

    #[test]
    fn test_absent_is_neutral() {
        assert_eq!(normalize_proficiency(None), 3);
    }

    #[test]
    fn test_always_in_range() {
        for i in -20..=20 {
            let p = normalize_proficiency(Some(&RawProficiency::Numeric(i as f64 * 0.37)));
            assert!((MIN_PROFICIENCY..=MAX_PROFICIENCY).contains(&p), "{p}");
        }
    }
}
