//! WellnessAI prompt builder

use super::form::ValidatedPlan;
use super::types::Metrics;

const NOT_AVAILABLE: &str = "N/A";

/// Build the labeled-lines prompt sent with the WellnessAI system instruction
pub fn build_plan_prompt(plan: &ValidatedPlan, metrics: &Metrics) -> String {
    let profile = &plan.profile;
    let preferences = if plan.dietary_preferences.is_empty() {
        "None specified"
    } else {
        plan.dietary_preferences.as_str()
    };

    let lines = [
        "User Profile:".to_string(),
        format!("- Age: {} years", profile.age),
        format!("- Gender: {}", profile.sex.form_value()),
        format!("- Height: {} cm", profile.height_cm),
        format!("- Weight: {} kg", profile.weight_kg),
        format!("- Primary Goal: {}", plan.primary_goal.label()),
        format!("- Activity Level: {}", plan.activity_level.label()),
        format!("- Dietary Preferences/Restrictions: {}", preferences),
        "\nCalculated Metrics (for your reference, do NOT repeat these in your response):"
            .to_string(),
        format!("- BMI: {}", format_metric(metrics.bmi, None)),
        format!("- BMR: {}", format_metric(metrics.bmr, Some("kcal/day"))),
        format!("- TDEE: {}", format_metric(metrics.tdee, Some("kcal/day"))),
        "\nPlease act as WellnessAI and provide a personalized wellness plan based on the above information, following all persona guidelines.".to_string(),
    ];

    lines.join("\n")
}

/// Value with optional unit, or "N/A"
pub fn format_metric(value: Option<f64>, unit: Option<&str>) -> String {
    match (value, unit) {
        (Some(v), Some(unit)) => format!("{} {}", v, unit),
        (Some(v), None) => v.to_string(),
        (None, _) => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wellness::calculator::compute_metrics;
    use crate::wellness::form::tests::complete_form;
    use crate::wellness::types::Sex;

    #[test]
    fn test_prompt_layout() {
        let plan = complete_form().validate().unwrap();
        let metrics = compute_metrics(&plan.profile);
        let prompt = build_plan_prompt(&plan, &metrics);

        let expected = "User Profile:\n\
- Age: 30 years\n\
- Gender: female\n\
- Height: 175 cm\n\
- Weight: 70.5 kg\n\
- Primary Goal: Weight Loss\n\
- Activity Level: Sedentary (little or no exercise)\n\
- Dietary Preferences/Restrictions: vegetarian\n\
\n\
Calculated Metrics (for your reference, do NOT repeat these in your response):\n\
- BMI: 23\n\
- BMR: 1488 kcal/day\n\
- TDEE: 1786 kcal/day\n\
\n\
Please act as WellnessAI and provide a personalized wellness plan based on the above information, following all persona guidelines.";

        assert_eq!(prompt, expected);
    }

    #[test]
    fn test_prompt_marks_missing_metrics() {
        let mut form = complete_form();
        form.sex = Some(Sex::Unspecified);
        form.dietary_preferences = "   ".to_string();
        let plan = form.validate().unwrap();
        let metrics = compute_metrics(&plan.profile);
        let prompt = build_plan_prompt(&plan, &metrics);

        assert!(prompt.contains("- Gender: other\n"));
        assert!(prompt.contains("- Dietary Preferences/Restrictions: None specified\n"));
        assert!(prompt.contains("- BMR: N/A\n"));
        assert!(prompt.contains("- TDEE: N/A\n"));
    }
}
