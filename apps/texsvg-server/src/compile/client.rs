//! Remote compiler client
//!
//! The remote service is a CGI script: it answers compile errors with a
//! text log and a success status, so the outcome is decided on the
//! response `Content-Type` alone.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use super::payload::CompilePayload;
use super::types::{CompileOutcome, TransportError};
use crate::config::CompilerConfig;

/// Remote LaTeX compiler
#[async_trait]
pub trait RemoteCompiler: Send + Sync {
    /// Submit a document and classify the response
    async fn compile(&self, payload: CompilePayload) -> Result<CompileOutcome, TransportError>;
}

/// Client for texlive.net's `latexcgi` (or a compatible endpoint)
#[derive(Clone)]
pub struct TexliveClient {
    http: reqwest::Client,
    endpoint: String,
    timeout_secs: u64,
}

impl TexliveClient {
    pub fn new(config: &CompilerConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                endpoint: self.endpoint.clone(),
                secs: self.timeout_secs,
            }
        } else {
            TransportError::Unreachable {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl RemoteCompiler for TexliveClient {
    async fn compile(&self, payload: CompilePayload) -> Result<CompileOutcome, TransportError> {
        tracing::debug!(
            "Submitting {} ({} bytes) to {}",
            payload.filename,
            payload.contents.len(),
            self.endpoint
        );

        let response = self
            .http
            .post(&self.endpoint)
            .multipart(payload.to_form())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let is_pdf = is_pdf_content_type(
            response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
        );

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                self.transport_error(e)
            } else {
                TransportError::Body(e.to_string())
            }
        })?;

        if is_pdf {
            tracing::debug!("Compiler returned PDF ({} bytes, status {})", body.len(), status);
            Ok(CompileOutcome::Success { pdf: body.to_vec() })
        } else {
            tracing::debug!("Compiler returned diagnostic ({} bytes, status {})", body.len(), status);
            Ok(CompileOutcome::Failure {
                diagnostic: String::from_utf8_lossy(&body).into_owned(),
            })
        }
    }
}

/// Whether a `Content-Type` value denotes a PDF body
pub fn is_pdf_content_type(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|value| value.split(';').next())
        .map(|media_type| media_type.trim().eq_ignore_ascii_case("application/pdf"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Multipart, State},
        http::{header, HeaderMap},
        response::IntoResponse,
        routing::post,
        Router,
    };
    use std::sync::{Arc, Mutex};

    /// What the fake compiler saw of the last submission
    #[derive(Debug, Clone, Default)]
    struct Captured {
        fields: Vec<(String, String)>,
        content_length: Option<String>,
        transfer_encoding: Option<String>,
    }

    type Received = Arc<Mutex<Captured>>;

    const FAKE_PDF: &[u8] = b"%PDF-1.5\n%fake\n";

    /// Minimal stand-in for latexcgi: returns a PDF unless the source
    /// contains `\undefined`
    async fn fake_latexcgi(
        State(received): State<Received>,
        headers: HeaderMap,
        mut multipart: Multipart,
    ) -> impl IntoResponse {
        let mut fields = Vec::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let value = field.text().await.unwrap();
            fields.push((name, value));
        }

        let header_text = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };

        let failed = fields.iter().any(|(_, v)| v.contains("\\undefined"));
        *received.lock().unwrap() = Captured {
            fields,
            content_length: header_text(header::CONTENT_LENGTH),
            transfer_encoding: header_text(header::TRANSFER_ENCODING),
        };

        if failed {
            (
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                b"! Undefined control sequence.\nl.1 \\undefined".to_vec(),
            )
        } else {
            ([(header::CONTENT_TYPE, "application/pdf")], FAKE_PDF.to_vec())
        }
    }

    /// Never answers within the client timeout
    async fn stalled_latexcgi() -> impl IntoResponse {
        tokio::time::sleep(Duration::from_secs(5)).await;
        ([(header::CONTENT_TYPE, "application/pdf")], FAKE_PDF.to_vec())
    }

    async fn spawn_fake_compiler() -> (String, Received) {
        let received: Received = Arc::default();
        let app = Router::new()
            .route("/cgi-bin/latexcgi", post(fake_latexcgi))
            .route("/cgi-bin/stalled", post(stalled_latexcgi))
            .with_state(received.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/cgi-bin/latexcgi", addr), received)
    }

    fn client_for(endpoint: String) -> TexliveClient {
        TexliveClient::new(&CompilerConfig {
            endpoint,
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_pdf_content_type_detection() {
        assert!(is_pdf_content_type(Some("application/pdf")));
        assert!(is_pdf_content_type(Some("Application/PDF; charset=binary")));
        assert!(!is_pdf_content_type(Some("text/plain; charset=utf-8")));
        assert!(!is_pdf_content_type(Some("application/pdfx")));
        assert!(!is_pdf_content_type(None));
    }

    #[tokio::test]
    async fn test_submits_multipart_fields() {
        let (endpoint, received) = spawn_fake_compiler().await;
        let client = client_for(endpoint);

        let source = "\\documentclass{article}\\begin{document}Hi\\end{document}";
        let outcome = client.compile(CompilePayload::new(source)).await.unwrap();

        assert_eq!(outcome, CompileOutcome::Success { pdf: FAKE_PDF.to_vec() });

        let captured = received.lock().unwrap().clone();
        assert_eq!(
            captured.fields,
            vec![
                ("filename[]".to_string(), "document.tex".to_string()),
                ("filecontents[]".to_string(), source.to_string()),
                ("return".to_string(), "pdf".to_string()),
            ]
        );

        // latexcgi rejects chunked uploads
        let content_length: usize = captured.content_length.unwrap().parse().unwrap();
        assert!(content_length > source.len());
        assert_eq!(captured.transfer_encoding, None);
    }

    #[tokio::test]
    async fn test_slow_compiler_is_timeout() {
        let (endpoint, _) = spawn_fake_compiler().await;
        let client = TexliveClient::new(&CompilerConfig {
            endpoint: endpoint.replace("latexcgi", "stalled"),
            timeout_secs: 1,
        })
        .unwrap();

        let result = client.compile(CompilePayload::new("x")).await;

        assert!(matches!(result, Err(TransportError::Timeout { secs: 1, .. })));
    }

    #[tokio::test]
    async fn test_non_pdf_response_is_diagnostic() {
        let (endpoint, _) = spawn_fake_compiler().await;
        let client = client_for(endpoint);

        let outcome = client
            .compile(CompilePayload::new("\\undefined"))
            .await
            .unwrap();

        match outcome {
            CompileOutcome::Failure { diagnostic } => {
                assert!(diagnostic.starts_with("! Undefined control sequence."));
            }
            other => panic!("expected diagnostic, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_compiler_is_transport_error() {
        // Bind and drop to get a port nothing is listening on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}/cgi-bin/latexcgi", addr));
        let result = client.compile(CompilePayload::new("x")).await;

        assert!(matches!(result, Err(TransportError::Unreachable { .. })));
    }
}
