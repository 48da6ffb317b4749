//! Wellness Planner
//!
//! Everything behind the "WellnessAI" planner form.
//!
//! ## Components
//!
//! - **types**: Profile, Sex, ActivityLevel, PrimaryGoal, Metrics
//! - **calculator**: BMI / BMR / TDEE, pure and total
//! - **form**: raw form input and its validation
//! - **prompt**: labeled-lines prompt for the text generator
//! - **planner**: per-view state tying the above to the collaborator
//!
//! ## Example
//!
//! ```rust
//! use health_saarthi::wellness::{compute_metrics, ActivityLevel, Profile, Sex};
//!
//! let profile = Profile::new(30, Sex::Male, 175.0, 70.0).activity(ActivityLevel::Sedentary);
//! let metrics = compute_metrics(&profile);
//!
//! assert_eq!(metrics.bmi, Some(22.9));
//! assert_eq!(metrics.bmr, Some(1649.0));
//! assert_eq!(metrics.tdee, Some(1979.0));
//! ```

mod calculator;
mod form;
mod planner;
mod prompt;
mod types;

pub use calculator::{
    basal_metabolic_rate, body_mass_index, compute_metrics, sex_note, UNSPECIFIED_SEX_NOTE,
};
pub use form::{PlannerForm, ValidatedPlan, ValidationError};
pub use planner::{PlanReport, PlannerError, PlannerSession};
pub use prompt::{build_plan_prompt, format_metric};
pub use types::{ActivityLevel, Metrics, PrimaryGoal, Profile, Sex};
