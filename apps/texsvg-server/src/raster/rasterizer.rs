//! First-page PDF to SVG conversion via pdf2svg

use std::ffi::OsString;
use std::sync::Arc;
use std::time::Duration;

use super::process::{ProcessRunner, TokioProcessRunner};
use super::scratch::ScratchSpace;
use super::types::{ConversionResult, RasterError};
use crate::config::RasterizerConfig;

/// Only the first page is ever rendered
pub const FIRST_PAGE: u32 = 1;

/// Converts compiled PDFs to SVG previews
#[derive(Clone)]
pub struct Rasterizer {
    tool: String,
    timeout: Duration,
    runner: Arc<dyn ProcessRunner>,
    scratch: ScratchSpace,
}

impl Rasterizer {
    pub fn new(
        config: &RasterizerConfig,
        runner: Arc<dyn ProcessRunner>,
        scratch: ScratchSpace,
    ) -> Self {
        Self {
            tool: config.tool_path.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            runner,
            scratch,
        }
    }

    /// Rasterizer running the real tool with UUID-named scratch files
    pub fn from_config(config: &RasterizerConfig) -> Self {
        Self::new(
            config,
            Arc::new(TokioProcessRunner),
            ScratchSpace::new(config.scratch_dir.clone()),
        )
    }

    /// Render the first page of `pdf` as SVG.
    ///
    /// Both scratch files are scheduled for removal on every path out of
    /// this function; removal is not awaited.
    pub async fn rasterize(&self, pdf: &[u8]) -> Result<ConversionResult, RasterError> {
        let pair = self.scratch.allocate();

        tokio::fs::write(pair.pdf_path(), pdf).await?;

        let args: Vec<OsString> = vec![
            pair.pdf_path().into(),
            pair.svg_path().into(),
            FIRST_PAGE.to_string().into(),
        ];

        let output = tokio::time::timeout(self.timeout, self.runner.run(&self.tool, &args))
            .await
            .map_err(|_| RasterError::Timeout {
                tool: self.tool.clone(),
                secs: self.timeout.as_secs(),
            })?
            .map_err(|source| RasterError::Spawn {
                tool: self.tool.clone(),
                source,
            })?;

        if !output.success {
            tracing::warn!(
                "{} exited with status {:?} for {}",
                self.tool,
                output.status,
                pair.pdf_path().display()
            );
            pair.release();
            return Ok(ConversionResult::ToolFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let svg = tokio::fs::read_to_string(pair.svg_path()).await;
        pair.release();

        Ok(ConversionResult::Rendered(svg?))
    }
}
