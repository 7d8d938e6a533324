//! Error handling for buildstat-store
//!
//! Wraps buildstat-core ExError with store-specific helpers

use buildstat_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a store-unavailable error
pub fn store_unavailable(operation: &str, reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::StoreUnavailable)
        .with_op(operation.to_string())
        .with_message(reason)
}

/// Wrap a lower-level failure as store-unavailable
pub fn store_unavailable_from(operation: &str, source: ExError) -> ExError {
    let message = source.message().to_string();
    store_unavailable(operation, message).with_source(source)
}

/// Create a render-failure error for report output
pub fn render_failure(operation: &str, reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::RenderFailure)
        .with_op(operation.to_string())
        .with_message(reason)
}
