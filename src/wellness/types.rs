//! Wellness Types
//!
//! Profile inputs, the fixed option tables of the planner form and the
//! derived metrics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sex used for the Mifflin-St Jeor offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
    /// "Other / prefer not to say". BMR and TDEE are not computed.
    #[serde(alias = "other")]
    Unspecified,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Unspecified => "unspecified",
        }
    }

    /// The planner form's wording, used in the plan prompt
    pub fn form_value(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Unspecified => "other",
        }
    }

    /// Mifflin-St Jeor constant for this sex, if it has one
    pub fn bmr_offset(&self) -> Option<f64> {
        match self {
            Sex::Male => Some(5.0),
            Sex::Female => Some(-161.0),
            Sex::Unspecified => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            "unspecified" | "other" => Ok(Sex::Unspecified),
            other => Err(format!(
                "unknown sex '{}', expected male, female or other",
                other
            )),
        }
    }
}

/// Activity tiers with their TDEE multipliers.
///
/// There are exactly four tiers; there is no "extra active" tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 4] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
    ];

    pub fn factor(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (little or no exercise)",
            ActivityLevel::LightlyActive => {
                "Lightly Active (light exercise/sports 1-3 days/week)"
            }
            ActivityLevel::ModeratelyActive => {
                "Moderately Active (moderate exercise/sports 3-5 days/week)"
            }
            ActivityLevel::VeryActive => "Very Active (hard exercise/sports 6-7 days a week)",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        ActivityLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown activity level '{}', expected one of: sedentary, lightly_active, moderately_active, very_active",
                    s
                )
            })
    }
}

/// Primary goal offered by the planner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryGoal {
    WeightLoss,
    MuscleGain,
    ImproveEnergy,
    StressManagement,
    BetterSleep,
    GeneralHealth,
    ImproveDiet,
}

impl PrimaryGoal {
    pub const ALL: [PrimaryGoal; 7] = [
        PrimaryGoal::WeightLoss,
        PrimaryGoal::MuscleGain,
        PrimaryGoal::ImproveEnergy,
        PrimaryGoal::StressManagement,
        PrimaryGoal::BetterSleep,
        PrimaryGoal::GeneralHealth,
        PrimaryGoal::ImproveDiet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrimaryGoal::WeightLoss => "weight_loss",
            PrimaryGoal::MuscleGain => "muscle_gain",
            PrimaryGoal::ImproveEnergy => "improve_energy",
            PrimaryGoal::StressManagement => "stress_management",
            PrimaryGoal::BetterSleep => "better_sleep",
            PrimaryGoal::GeneralHealth => "general_health",
            PrimaryGoal::ImproveDiet => "improve_diet",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PrimaryGoal::WeightLoss => "Weight Loss",
            PrimaryGoal::MuscleGain => "Muscle Gain",
            PrimaryGoal::ImproveEnergy => "Improved Energy Levels",
            PrimaryGoal::StressManagement => "Stress Management",
            PrimaryGoal::BetterSleep => "Better Sleep",
            PrimaryGoal::GeneralHealth => "General Health Improvement",
            PrimaryGoal::ImproveDiet => "Improve Diet Quality",
        }
    }
}

impl FromStr for PrimaryGoal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        PrimaryGoal::ALL
            .into_iter()
            .find(|goal| goal.as_str() == normalized)
            .ok_or_else(|| format!("unknown primary goal '{}'", s))
    }
}

/// Inputs to the metrics calculator.
///
/// Zero, negative or non-finite numbers count as missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub age: u32,
    pub sex: Sex,
    #[serde(default)]
    pub height_cm: f64,
    #[serde(default)]
    pub weight_kg: f64,
    #[serde(default, alias = "activity_level")]
    pub activity: Option<ActivityLevel>,
}

impl Profile {
    pub fn new(age: u32, sex: Sex, height_cm: f64, weight_kg: f64) -> Self {
        Self {
            age,
            sex,
            height_cm,
            weight_kg,
            activity: None,
        }
    }

    /// Set the activity tier
    pub fn activity(mut self, level: ActivityLevel) -> Self {
        self.activity = Some(level);
        self
    }
}

/// Derived health metrics. `None` means "not computable".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tdee: Option<f64>,
}

impl Metrics {
    pub fn is_empty(&self) -> bool {
        self.bmi.is_none() && self.bmr.is_none() && self.tdee.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_table_has_four_tiers() {
        assert_eq!(ActivityLevel::ALL.len(), 4);
        assert_eq!(ActivityLevel::Sedentary.factor(), 1.2);
        assert_eq!(ActivityLevel::VeryActive.factor(), 1.725);
        assert!("extra_active".parse::<ActivityLevel>().is_err());
    }

    #[test]
    fn test_parse_options() {
        assert_eq!("Moderately-Active".parse(), Ok(ActivityLevel::ModeratelyActive));
        assert_eq!("other".parse(), Ok(Sex::Unspecified));
        assert_eq!("F".parse(), Ok(Sex::Female));
        assert_eq!("better sleep".parse(), Ok(PrimaryGoal::BetterSleep));
        assert!("sometimes".parse::<PrimaryGoal>().is_err());
    }

    #[test]
    fn test_sex_serde_accepts_other() {
        let sex: Sex = serde_json::from_str("\"other\"").unwrap();
        assert_eq!(sex, Sex::Unspecified);
        assert_eq!(serde_json::to_string(&Sex::Male).unwrap(), "\"male\"");
        assert_eq!(Sex::Unspecified.form_value(), "other");
        assert_eq!(Sex::Female.form_value(), "female");
    }

    #[test]
    fn test_metrics_skip_absent_fields() {
        let metrics = Metrics {
            bmi: Some(22.9),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&metrics).unwrap(), r#"{"bmi":22.9}"#);
        assert!(Metrics::default().is_empty());
    }
}
