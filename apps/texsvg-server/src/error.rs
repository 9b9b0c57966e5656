//! Error types for the TexSvg server
//!
//! Every pipeline failure ends up as one [`AppError`], which maps to exactly
//! one plain-text HTTP response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::compile::TransportError;
use crate::raster::RasterError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    /// The remote compiler answered with a log instead of a PDF
    #[error("Compilation failed")]
    Compile(String),

    #[error("Compiler transport error: {0}")]
    Transport(#[from] TransportError),

    /// pdf2svg exited non-zero; carries its stderr
    #[error("Rasterization failed")]
    Rasterization(String),

    #[error("Rasterizer error: {0}")]
    Raster(#[from] RasterError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Compile(_) => StatusCode::BAD_REQUEST,
            Self::Transport(TransportError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            Self::Transport(_) => StatusCode::BAD_GATEWAY,
            Self::Rasterization(_) | Self::Raster(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::Unauthorized => "Unauthorized".to_string(),
            AppError::Compile(diagnostic) => {
                tracing::debug!("Compile failed ({} bytes of log)", diagnostic.len());
                diagnostic
            }
            AppError::Transport(e) => {
                tracing::error!("Compiler transport error: {}", e);
                e.to_string()
            }
            AppError::Rasterization(stderr) => {
                tracing::error!("pdf2svg failed: {}", stderr.trim_end());
                stderr
            }
            AppError::Raster(e) => {
                tracing::error!("Rasterizer error: {}", e);
                e.to_string()
            }
        };

        (status, body).into_response()
    }
}
