//! Planner Form
//!
//! Raw planner inputs as submitted, and their validation into a [`Profile`].

use super::types::{ActivityLevel, PrimaryGoal, Profile, Sex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Planner form as submitted. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerForm {
    #[serde(default, alias = "gender")]
    pub sex: Option<Sex>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default, alias = "weight")]
    pub weight_kg: Option<f64>,
    #[serde(default, alias = "height")]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub primary_goal: Option<PrimaryGoal>,
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default)]
    pub dietary_preferences: String,
}

/// A form that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPlan {
    pub profile: Profile,
    pub primary_goal: PrimaryGoal,
    pub activity_level: ActivityLevel,
    /// Trimmed; empty when none were given
    pub dietary_preferences: String,
}

/// A required planner field is missing or not a positive number
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} must be a positive number, got {value}")]
    NotPositive { field: &'static str, value: String },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing(field) => field,
            ValidationError::NotPositive { field, .. } => field,
        }
    }
}

impl PlannerForm {
    /// Check every required field, reporting the first one that fails
    pub fn validate(&self) -> Result<ValidatedPlan, ValidationError> {
        let sex = self.sex.ok_or(ValidationError::Missing("sex"))?;

        let age = self.age.ok_or(ValidationError::Missing("age"))?;
        if age == 0 {
            return Err(ValidationError::NotPositive {
                field: "age",
                value: age.to_string(),
            });
        }

        let weight_kg = positive(self.weight_kg, "weight_kg")?;
        let height_cm = positive(self.height_cm, "height_cm")?;

        let primary_goal = self
            .primary_goal
            .ok_or(ValidationError::Missing("primary_goal"))?;
        let activity_level = self
            .activity_level
            .ok_or(ValidationError::Missing("activity_level"))?;

        Ok(ValidatedPlan {
            profile: Profile::new(age, sex, height_cm, weight_kg).activity(activity_level),
            primary_goal,
            activity_level,
            dietary_preferences: self.dietary_preferences.trim().to_string(),
        })
    }
}

fn positive(value: Option<f64>, field: &'static str) -> Result<f64, ValidationError> {
    let value = value.ok_or(ValidationError::Missing(field))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive {
            field,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn complete_form() -> PlannerForm {
        PlannerForm {
            sex: Some(Sex::Female),
            age: Some(30),
            weight_kg: Some(70.5),
            height_cm: Some(175.0),
            primary_goal: Some(PrimaryGoal::WeightLoss),
            activity_level: Some(ActivityLevel::Sedentary),
            dietary_preferences: "  vegetarian ".to_string(),
        }
    }

    #[test]
    fn test_complete_form_validates() {
        let plan = complete_form().validate().unwrap();
        assert_eq!(plan.profile.age, 30);
        assert_eq!(plan.profile.sex, Sex::Female);
        assert_eq!(plan.profile.activity, Some(ActivityLevel::Sedentary));
        assert_eq!(plan.dietary_preferences, "vegetarian");
    }

    #[test]
    fn test_unspecified_sex_is_a_valid_choice() {
        let form = PlannerForm {
            sex: Some(Sex::Unspecified),
            ..complete_form()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_reports_first_missing_field() {
        let err = PlannerForm::default().validate().unwrap_err();
        assert_eq!(err, ValidationError::Missing("sex"));

        let form = PlannerForm {
            height_cm: None,
            primary_goal: None,
            ..complete_form()
        };
        assert_eq!(form.validate().unwrap_err().field(), "height_cm");
    }

    #[test]
    fn test_rejects_non_positive_numbers() {
        let form = PlannerForm {
            age: Some(0),
            ..complete_form()
        };
        assert_eq!(form.validate().unwrap_err().field(), "age");

        let form = PlannerForm {
            weight_kg: Some(-3.0),
            ..complete_form()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.to_string(), "weight_kg must be a positive number, got -3");

        let form = PlannerForm {
            height_cm: Some(f64::NAN),
            ..complete_form()
        };
        assert_eq!(form.validate().unwrap_err().field(), "height_cm");
    }

    #[test]
    fn test_deserialize_with_form_aliases() {
        let form: PlannerForm = serde_json::from_str(
            r#"{"gender": "other", "age": 41, "weight": 80, "height": 180,
                "primary_goal": "better_sleep", "activity_level": "very_active"}"#,
        )
        .unwrap();
        assert_eq!(form.sex, Some(Sex::Unspecified));
        assert_eq!(form.weight_kg, Some(80.0));
        assert_eq!(form.dietary_preferences, "");
    }
}
