//! Error types for link rewriting.

use std::error::Error;

/// Error from a wiki backend call.
///
/// Carries the name of the failed capability and the transport-specific source.
#[derive(Debug, thiserror::Error)]
#[error("wiki backend call `{operation}` failed: {source}")]
pub struct BackendError {
    /// Capability that failed (e.g. `page_id`, `attach_file`).
    pub operation: &'static str,
    source: Box<dyn Error + Send + Sync>,
}

impl BackendError {
    /// Create a backend error for the given operation.
    #[must_use]
    pub fn new(operation: &'static str, source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self {
            operation,
            source: source.into(),
        }
    }
}

/// Error while rewriting the links of a document.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LinkError {
    /// A wiki backend call failed; the document's link set is incomplete.
    #[error("{0}")]
    Backend(#[from] BackendError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_message_includes_operation_and_source() {
        let err = BackendError::new("page_id", "connection reset");
        assert_eq!(
            err.to_string(),
            "wiki backend call `page_id` failed: connection reset"
        );
    }

    #[test]
    fn test_backend_error_exposes_source() {
        let err = BackendError::new("attach_file", std::io::Error::other("boom"));
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "boom");
    }
}
