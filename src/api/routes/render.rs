//! Render Routes
//!
//! - POST /api/v1/render - Turn generated text into display nodes or escaped HTML

use axum::{extract::rejection::JsonRejection, Json};

use crate::api::dto::{RenderFormat, RenderRequest, RenderResponse};
use crate::api::error::ApiResult;
use crate::render::{html, render_sections};

/// POST /api/v1/render
pub async fn render_text(
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> ApiResult<Json<RenderResponse>> {
    let Json(req) = payload?;
    let sections = render_sections(&req.text);

    let response = match req.format {
        RenderFormat::Nodes => RenderResponse {
            sections: Some(sections),
            html: None,
        },
        RenderFormat::Html => RenderResponse {
            sections: None,
            html: Some(html::to_html(&sections, req.sources.as_deref())),
        },
    };

    Ok(Json(response))
}
