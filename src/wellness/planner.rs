//! Wellness Planner Session
//!
//! State owned by one planner view: the form, the computed metrics, the
//! generated plan, the last error and the busy flag.

use super::calculator::{compute_metrics, sex_note};
use super::form::{PlannerForm, ValidationError};
use super::prompt::build_plan_prompt;
use super::types::Metrics;
use crate::ai::{prompts, AiError, AiHandle, GenerateRequest, GenerateResult};
use serde::Serialize;
use thiserror::Error;

/// Errors from a planner submission
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("a plan is already being generated")]
    Busy,

    #[error("Please fill in all required fields with valid values: {0}")]
    Validation(#[from] ValidationError),

    #[error("AI service is not available. Please ensure the API key is configured.")]
    Unconfigured,

    #[error("{0}")]
    Collaborator(AiError),
}

/// Outcome of a successful submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanReport {
    pub metrics: Metrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_note: Option<&'static str>,
    pub plan: String,
    pub disclaimer: &'static str,
}

/// One planner view
#[derive(Debug, Default)]
pub struct PlannerSession {
    form: PlannerForm,
    metrics: Option<Metrics>,
    metrics_note: Option<&'static str>,
    plan: Option<String>,
    error: Option<String>,
    busy: bool,
}

impl PlannerSession {
    pub fn new(form: PlannerForm) -> Self {
        Self {
            form,
            ..Default::default()
        }
    }

    pub fn form(&self) -> &PlannerForm {
        &self.form
    }

    /// Replace the form. Any previous results no longer apply and are cleared.
    pub fn set_form(&mut self, form: PlannerForm) {
        self.form = form;
        self.metrics = None;
        self.metrics_note = None;
        self.plan = None;
        self.error = None;
    }

    pub fn metrics(&self) -> Option<&Metrics> {
        self.metrics.as_ref()
    }

    pub fn plan(&self) -> Option<&str> {
        self.plan.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Validate the form, compute metrics and build the request.
    ///
    /// On success the session is busy until [`finish_submit`](Self::finish_submit).
    pub fn begin_submit(&mut self) -> Result<GenerateRequest, PlannerError> {
        if self.busy {
            return Err(PlannerError::Busy);
        }
        self.error = None;
        self.plan = None;

        let validated = match self.form.validate() {
            Ok(validated) => validated,
            Err(e) => {
                self.error = Some(e.to_string());
                return Err(e.into());
            }
        };

        let metrics = compute_metrics(&validated.profile);
        self.metrics = Some(metrics);
        self.metrics_note = sex_note(&validated.profile);
        self.busy = true;

        tracing::debug!(
            goal = validated.primary_goal.as_str(),
            activity = validated.activity_level.as_str(),
            ?metrics,
            "Planner submission validated"
        );

        Ok(GenerateRequest::new(build_plan_prompt(&validated, &metrics))
            .system_instruction(prompts::WELLNESS_AI_INSTRUCTION))
    }

    /// Store the generated plan, or the collaborator's error message
    pub fn finish_submit(
        &mut self,
        result: Result<GenerateResult, AiError>,
    ) -> Result<PlanReport, PlannerError> {
        self.busy = false;
        match result {
            Ok(result) => {
                self.plan = Some(result.text.clone());
                Ok(PlanReport {
                    metrics: self.metrics.unwrap_or_default(),
                    metrics_note: self.metrics_note,
                    plan: result.text,
                    disclaimer: prompts::PLANNER_DISCLAIMER,
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "Plan generation failed");
                self.plan = None;
                self.error = Some(e.to_string());
                Err(PlannerError::Collaborator(e))
            }
        }
    }

    /// Run one full submission against the collaborator
    pub async fn submit(&mut self, ai: &AiHandle) -> Result<PlanReport, PlannerError> {
        if !ai.is_configured() {
            return Err(PlannerError::Unconfigured);
        }
        let request = self.begin_submit()?;
        let result = ai.generate(&request).await;
        self.finish_submit(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::mock::{handle, ScriptedGenerator};
    use crate::wellness::form::tests::complete_form;
    use crate::wellness::types::Sex;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_submit_success() {
        let generator = Arc::new(ScriptedGenerator::new().reply("### Your Personalized Wellness Plan"));
        let ai = handle(Arc::clone(&generator));
        let mut session = PlannerSession::new(complete_form());

        let report = session.submit(&ai).await.unwrap();
        assert_eq!(report.metrics.bmr, Some(1488.0));
        assert_eq!(report.plan, "### Your Personalized Wellness Plan");
        assert!(report.metrics_note.is_none());
        assert_eq!(session.plan(), Some("### Your Personalized Wellness Plan"));
        assert!(!session.is_busy());

        let request = &generator.requests.lock().unwrap()[0];
        assert!(request.prompt.starts_with("User Profile:\n- Age: 30 years"));
        assert_eq!(
            request.system_instruction.as_deref(),
            Some(prompts::WELLNESS_AI_INSTRUCTION)
        );
    }

    #[tokio::test]
    async fn test_validation_error_skips_collaborator() {
        let generator = Arc::new(ScriptedGenerator::new().reply("unused"));
        let ai = handle(Arc::clone(&generator));
        let mut form = complete_form();
        form.age = None;
        let mut session = PlannerSession::new(form);

        let err = session.submit(&ai).await.unwrap_err();
        assert!(matches!(err, PlannerError::Validation(ValidationError::Missing("age"))));
        assert!(session.metrics().is_none());
        assert_eq!(session.error(), Some("age is required"));
        assert!(generator.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_collaborator_error_keeps_metrics() {
        let ai = handle(Arc::new(ScriptedGenerator::new().fail("model overloaded")));
        let mut session = PlannerSession::new(complete_form());

        let err = session.submit(&ai).await.unwrap_err();
        assert_eq!(err.to_string(), "API error 500: model overloaded");
        assert_eq!(session.error(), Some("API error 500: model overloaded"));
        assert!(session.plan().is_none());
        assert!(session.metrics().is_some());
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_unconfigured() {
        let mut session = PlannerSession::new(complete_form());
        let err = session.submit(&AiHandle::Unconfigured).await.unwrap_err();
        assert!(matches!(err, PlannerError::Unconfigured));
    }

    #[test]
    fn test_busy_gate_and_form_reset() {
        let mut session = PlannerSession::new(complete_form());
        session.begin_submit().unwrap();
        assert!(matches!(session.begin_submit(), Err(PlannerError::Busy)));

        session
            .finish_submit(Ok(GenerateResult {
                text: "plan".to_string(),
                sources: None,
            }))
            .unwrap();
        assert_eq!(session.plan(), Some("plan"));

        let mut form = complete_form();
        form.sex = Some(Sex::Unspecified);
        session.set_form(form);
        assert!(session.plan().is_none());
        assert!(session.metrics().is_none());
    }

    #[test]
    fn test_unspecified_sex_note() {
        let mut form = complete_form();
        form.sex = Some(Sex::Unspecified);
        let mut session = PlannerSession::new(form);
        session.begin_submit().unwrap();
        let report = session.finish_submit(Ok(GenerateResult::default())).unwrap();
        assert!(report.metrics.bmr.is_none());
        assert!(report.metrics_note.is_some());
    }
}
