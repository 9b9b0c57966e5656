//! Multipart payload for the remote compiler

use reqwest::multipart::Form;

/// Name under which the document is submitted
pub const DOCUMENT_FILENAME: &str = "document.tex";

/// Output format requested from the compiler
pub const RETURN_FORMAT: &str = "pdf";

/// A document packaged for `latexcgi`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilePayload {
    pub filename: String,
    pub contents: String,
    pub return_format: String,
}

impl CompilePayload {
    /// Package raw LaTeX source. The source is forwarded verbatim.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            filename: DOCUMENT_FILENAME.to_string(),
            contents: source.into(),
            return_format: RETURN_FORMAT.to_string(),
        }
    }

    /// Form fields in submission order
    pub fn fields(&self) -> [(&'static str, &str); 3] {
        [
            ("filename[]", self.filename.as_str()),
            ("filecontents[]", self.contents.as_str()),
            ("return", self.return_format.as_str()),
        ]
    }

    /// Build the multipart form from [`CompilePayload::fields`].
    ///
    /// All parts are text, so reqwest knows the body length up front and
    /// sends it with a `Content-Length` instead of chunked encoding, which
    /// the CGI endpoint does not accept.
    pub fn to_form(&self) -> Form {
        self.fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value.to_string()))
    }
}
