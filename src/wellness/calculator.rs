//! Metrics Calculator
//!
//! BMI, BMR (Mifflin-St Jeor, 1990) and TDEE from a [`Profile`].
//!
//! The calculator is total: a missing or invalid input never fails, it only
//! suppresses the metrics that depend on it.

use super::types::{Metrics, Profile, Sex};

/// Shown next to the metrics when BMR/TDEE were skipped because sex is unspecified
pub const UNSPECIFIED_SEX_NOTE: &str = "BMR and TDEE calculations are most accurate for male/female biological sex. For 'Other', these are not calculated by default.";

/// Compute all metrics the profile allows
pub fn compute_metrics(profile: &Profile) -> Metrics {
    let bmi = body_mass_index(profile.weight_kg, profile.height_cm);
    let bmr = basal_metabolic_rate(profile);
    let tdee = match (bmr, profile.activity) {
        (Some(bmr), Some(level)) => Some((bmr * level.factor()).round()),
        _ => None,
    };

    tracing::trace!(?bmi, ?bmr, ?tdee, "computed metrics");

    Metrics { bmi, bmr, tdee }
}

/// weight / height², one decimal place
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if !is_positive(weight_kg) || !is_positive(height_cm) {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(round_to(weight_kg / (height_m * height_m), 1))
}

/// Mifflin-St Jeor, rounded to the nearest kcal
pub fn basal_metabolic_rate(profile: &Profile) -> Option<f64> {
    if profile.age == 0 || !is_positive(profile.weight_kg) || !is_positive(profile.height_cm) {
        return None;
    }
    let offset = profile.sex.bmr_offset()?;
    let base = 10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * f64::from(profile.age);
    Some((base + offset).round())
}

/// Note to display alongside the metrics, if any
pub fn sex_note(profile: &Profile) -> Option<&'static str> {
    match profile.sex {
        Sex::Unspecified => Some(UNSPECIFIED_SEX_NOTE),
        Sex::Male | Sex::Female => None,
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wellness::types::ActivityLevel;

    fn male() -> Profile {
        Profile::new(30, Sex::Male, 175.0, 70.0)
    }

    #[test]
    fn test_bmi_one_decimal() {
        let metrics = compute_metrics(&male());
        assert_eq!(metrics.bmi, Some(22.9));
    }

    #[test]
    fn test_bmr_male() {
        // 700 + 1093.75 - 150 + 5
        assert_eq!(compute_metrics(&male()).bmr, Some(1649.0));
    }

    #[test]
    fn test_bmr_female() {
        // 700 + 1093.75 - 150 - 161
        let profile = Profile::new(30, Sex::Female, 175.0, 70.0);
        assert_eq!(compute_metrics(&profile).bmr, Some(1483.0));
    }

    #[test]
    fn test_tdee_uses_rounded_bmr() {
        let metrics = compute_metrics(&male().activity(ActivityLevel::Sedentary));
        // 1649 * 1.2 = 1978.8
        assert_eq!(metrics.tdee, Some(1979.0));

        let metrics = compute_metrics(&male().activity(ActivityLevel::VeryActive));
        // 1649 * 1.725 = 2844.525
        assert_eq!(metrics.tdee, Some(2845.0));
    }

    #[test]
    fn test_tdee_requires_activity() {
        let metrics = compute_metrics(&male());
        assert!(metrics.bmr.is_some());
        assert_eq!(metrics.tdee, None);
    }

    #[test]
    fn test_unspecified_sex_skips_bmr_and_tdee() {
        let profile =
            Profile::new(30, Sex::Unspecified, 175.0, 70.0).activity(ActivityLevel::Sedentary);
        let metrics = compute_metrics(&profile);
        assert_eq!(metrics.bmi, Some(22.9));
        assert_eq!(metrics.bmr, None);
        assert_eq!(metrics.tdee, None);
        assert_eq!(sex_note(&profile), Some(UNSPECIFIED_SEX_NOTE));
        assert_eq!(sex_note(&male()), None);
    }

    #[test]
    fn test_missing_height_suppresses_everything() {
        let mut profile = male().activity(ActivityLevel::LightlyActive);
        profile.height_cm = 0.0;
        let metrics = compute_metrics(&profile);
        assert!(metrics.is_empty());
        assert_eq!(profile.age, 30);
        assert_eq!(profile.weight_kg, 70.0);
    }

    #[test]
    fn test_missing_age_keeps_bmi() {
        let mut profile = male().activity(ActivityLevel::Sedentary);
        profile.age = 0;
        let metrics = compute_metrics(&profile);
        assert_eq!(metrics.bmi, Some(22.9));
        assert_eq!(metrics.bmr, None);
        assert_eq!(metrics.tdee, None);
    }

    #[test]
    fn test_non_finite_inputs_never_panic() {
        let profile = Profile::new(30, Sex::Male, f64::NAN, f64::INFINITY);
        assert!(compute_metrics(&profile).is_empty());

        let profile = Profile::new(30, Sex::Female, -175.0, 70.0);
        assert!(compute_metrics(&profile).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let profile = male().activity(ActivityLevel::ModeratelyActive);
        assert_eq!(compute_metrics(&profile), compute_metrics(&profile));
    }
}
