//! Compile types

/// Result of a compile round-trip that reached the remote service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    /// The service returned a PDF
    Success { pdf: Vec<u8> },
    /// The service returned its compiler log instead
    Failure { diagnostic: String },
}

/// Failures talking to the remote service itself
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("LaTeX compiler at {endpoint} is unreachable: {reason}")]
    Unreachable { endpoint: String, reason: String },

    #[error("LaTeX compiler at {endpoint} did not answer within {secs}s")]
    Timeout { endpoint: String, secs: u64 },

    #[error("Failed to read compiler response: {0}")]
    Body(String),
}
