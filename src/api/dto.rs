//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use crate::chat::{ChatMessage, GroundingSource};
use crate::render::RenderNode;
use crate::wellness::{ActivityLevel, Metrics, PlanReport, Profile, Sex};
use serde::{Deserialize, Serialize};

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// "configured" or "unconfigured"
    pub ai: String,
    pub chat_sessions: usize,
    pub uptime_seconds: u64,
    pub version: String,
}

// ============================================
// WELLNESS DTOs
// ============================================

/// Metrics calculation request
///
/// Every field is optional so that a partial profile still yields whatever
/// can be computed from it.
#[derive(Debug, Default, Deserialize)]
pub struct MetricsRequest {
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub sex: Option<Sex>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default, alias = "activity")]
    pub activity_level: Option<ActivityLevel>,
}

impl MetricsRequest {
    /// Missing or non-positive numbers become zero, which the calculator
    /// treats as missing. A missing sex counts as unspecified.
    pub fn into_profile(self) -> Profile {
        Profile {
            age: self
                .age
                .and_then(|age| u32::try_from(age).ok())
                .unwrap_or(0),
            sex: self.sex.unwrap_or(Sex::Unspecified),
            height_cm: self.height_cm.unwrap_or(0.0),
            weight_kg: self.weight_kg.unwrap_or(0.0),
            activity: self.activity_level,
        }
    }
}

/// Metrics calculation response
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub metrics: Metrics,
    /// Shown when BMR and TDEE were skipped for unspecified sex
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

/// Wellness plan response
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    #[serde(flatten)]
    pub report: PlanReport,
    /// The plan parsed into display sections
    pub sections: Vec<Vec<RenderNode>>,
}

// ============================================
// RENDER DTOs
// ============================================

/// Output of the render endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    #[default]
    Nodes,
    Html,
}

/// Render request
#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub text: String,
    #[serde(default)]
    pub format: RenderFormat,
    /// Sources appended to HTML output
    #[serde(default)]
    pub sources: Option<Vec<GroundingSource>>,
}

/// Render response, one of the two fields depending on the format
#[derive(Debug, Serialize)]
pub struct RenderResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Vec<RenderNode>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

// ============================================
// CHAT DTOs
// ============================================

/// Send message request
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

/// The message appended after the user's turn
#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub message: ChatMessage,
    pub sections: Vec<Vec<RenderNode>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_request_maps_bad_numbers_to_missing() {
        let request: MetricsRequest =
            serde_json::from_str(r#"{"age": -5, "height_cm": 175, "weight_kg": 70}"#).unwrap();
        let profile = request.into_profile();
        assert_eq!(profile.age, 0);
        assert_eq!(profile.sex, Sex::Unspecified);
        assert_eq!(profile.height_cm, 175.0);
        assert!(profile.activity.is_none());

        let request: MetricsRequest =
            serde_json::from_str(r#"{"age": 99999999999, "sex": "female", "activity": "very_active"}"#)
                .unwrap();
        let profile = request.into_profile();
        assert_eq!(profile.age, 0);
        assert_eq!(profile.weight_kg, 0.0);
        assert_eq!(profile.activity, Some(ActivityLevel::VeryActive));
    }
}
