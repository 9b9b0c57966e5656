//! Rasterization types

/// Outcome of a pdf2svg run that actually executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionResult {
    /// SVG text of the first page
    Rendered(String),
    /// The tool exited non-zero
    ToolFailed { status: Option<i32>, stderr: String },
}

/// Rasterizer errors
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("Scratch file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} did not finish within {secs}s")]
    Timeout { tool: String, secs: u64 },
}
