//! LaTeX to SVG endpoint
//!
//! `POST /v1` compiles the submitted document remotely and returns its first
//! page as SVG. `GET /v1` runs the same pipeline on a built-in sample and
//! doubles as an end-to-end smoke test.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use crate::compile::{CompileOutcome, CompilePayload};
use crate::error::{AppError, Result};
use crate::raster::ConversionResult;
use crate::state::AppState;

/// Content type of successful responses
pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// Document rendered by `GET /v1`
pub const SAMPLE_DOCUMENT: &str = r"\documentclass{article}
\usepackage{amsmath}
\begin{document}
\section*{TexSvg}
Euler's identity:
\[ e^{i\pi} + 1 = 0 \]
\end{document}
";

/// Create the render router
pub fn router() -> Router<AppState> {
    Router::new().route("/v1", post(render_document).get(render_sample))
}

/// Render request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    /// LaTeX document source
    pub file_content: String,
}

async fn render_document(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Response> {
    render(&state, request.file_content).await
}

async fn render_sample(State(state): State<AppState>) -> Result<Response> {
    render(&state, SAMPLE_DOCUMENT.to_string()).await
}

/// Compile `source` and rasterize the first page of the result
pub async fn render(state: &AppState, source: String) -> Result<Response> {
    let pdf = match state.compiler().compile(CompilePayload::new(source)).await? {
        CompileOutcome::Success { pdf } => pdf,
        CompileOutcome::Failure { diagnostic } => return Err(AppError::Compile(diagnostic)),
    };

    match state.rasterizer().rasterize(&pdf).await? {
        ConversionResult::Rendered(svg) => {
            Ok(([(header::CONTENT_TYPE, SVG_CONTENT_TYPE)], svg).into_response())
        }
        ConversionResult::ToolFailed { stderr, .. } => Err(AppError::Rasterization(stderr)),
    }
}
