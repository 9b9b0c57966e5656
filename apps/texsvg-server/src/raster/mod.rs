//! PDF to SVG rasterization
//!
//! Converts the first page of a compiled PDF to SVG with `pdf2svg`.
//!
//! ## Requirements
//!
//! - `pdf2svg` must be installed and available in PATH (or configured via
//!   `PDF2SVG_PATH`)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use texsvg_server::raster::{ConversionResult, Rasterizer};
//!
//! let rasterizer = Rasterizer::from_config(&config.rasterizer);
//! match rasterizer.rasterize(&pdf_bytes).await? {
//!     ConversionResult::Rendered(svg) => { /* serve image/svg+xml */ }
//!     ConversionResult::ToolFailed { stderr, .. } => { /* report stderr */ }
//! }
//! ```

mod process;
mod rasterizer;
mod scratch;
mod types;

pub use process::{ProcessRunner, TokioProcessRunner, ToolOutput};
pub use rasterizer::{Rasterizer, FIRST_PAGE};
pub use scratch::{IdGenerator, ScratchPair, ScratchSpace, UuidGenerator};
pub use types::{ConversionResult, RasterError};
