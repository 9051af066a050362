//! Error types for engine entry points and host adapters.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Errors raised synchronously by an engine entry point, before any host call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    /// The caller supplied a selection the operation cannot act on.
    #[error("invalid input for {operation}: {reason}")]
    InvalidInput { operation: &'static str, reason: String },
    /// An engine setting is out of range.
    #[error("invalid engine config: {0}")]
    Config(String),
}

impl TransformError {
    pub(crate) fn invalid(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput { operation, reason: reason.into() }
    }

    /// Stable machine-readable code for the command layer.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "E_INVALID_INPUT",
            Self::Config(_) => "E_CONFIG",
        }
    }
}

/// Failure reported by a host protocol adapter. The dispatcher turns it into
/// a rejected confirmation; it never becomes a [`TransformError`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The host refused the request (for example a no-op artboard resize).
    #[error("request declined: {0}")]
    Declined(String),
    /// The host could not be reached or dropped the request.
    #[error("host unavailable: {0}")]
    Unavailable(String),
    /// The confirmation task was cancelled before the host answered.
    #[error("confirmation cancelled")]
    Cancelled,
}
