//! Remote LaTeX compilation
//!
//! Packages a document into the multipart form expected by texlive.net's
//! `latexcgi` endpoint and classifies the answer as either a compiled PDF
//! or a compiler log.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use texsvg_server::compile::{CompileOutcome, CompilePayload, RemoteCompiler, TexliveClient};
//!
//! let client = TexliveClient::new(&config.compiler)?;
//! match client.compile(CompilePayload::new(source)).await? {
//!     CompileOutcome::Success { pdf } => { /* rasterize */ }
//!     CompileOutcome::Failure { diagnostic } => { /* report the log */ }
//! }
//! ```

mod client;
mod payload;
mod types;

pub use client::{is_pdf_content_type, RemoteCompiler, TexliveClient};
pub use payload::{CompilePayload, DOCUMENT_FILENAME, RETURN_FORMAT};
pub use types::{CompileOutcome, TransportError};
