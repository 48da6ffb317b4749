//! Wellness Routes
//!
//! - POST /api/v1/wellness/metrics - BMI, BMR and TDEE for a profile
//! - POST /api/v1/wellness/plan - Validate a planner form and generate a plan

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{MetricsRequest, MetricsResponse, PlanResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::render::render_sections;
use crate::wellness::{compute_metrics, sex_note, PlannerForm, PlannerSession};

/// POST /api/v1/wellness/metrics
///
/// Missing, negative or zero numbers never fail the request: metrics that
/// cannot be computed are left out of the response. Only a body that is not
/// JSON, or a value of the wrong type, is rejected.
pub async fn calculate_metrics(
    payload: Result<Json<MetricsRequest>, JsonRejection>,
) -> ApiResult<Json<MetricsResponse>> {
    let Json(request) = payload?;
    let profile = request.into_profile();

    Ok(Json(MetricsResponse {
        metrics: compute_metrics(&profile),
        note: sex_note(&profile),
    }))
}

/// POST /api/v1/wellness/plan
///
/// Each request is its own planner view, so there is nothing to be busy with.
pub async fn generate_plan(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PlannerForm>, JsonRejection>,
) -> ApiResult<Json<PlanResponse>> {
    let Json(form) = payload?;
    let mut planner = PlannerSession::new(form);
    let report = planner.submit(&state.ai).await?;
    let sections = render_sections(&report.plan);

    Ok(Json(PlanResponse { report, sections }))
}
