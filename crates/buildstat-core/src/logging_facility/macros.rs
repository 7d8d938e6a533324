//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.
//! Callers must depend on `buildstat-core-types` (for the event names) and
//! `tracing`.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use buildstat_core::log_op_start;
/// log_op_start!("normalize");
/// log_op_start!("normalize", build_hash = "abc123");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = buildstat_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = buildstat_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use buildstat_core::log_op_end;
/// log_op_end!("normalize", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = buildstat_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = buildstat_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// `$err` must be an expression of type `ExError` (it is borrowed, not moved).
///
/// # Example
///
/// ```
/// # use buildstat_core::log_op_error;
/// # use buildstat_core::errors::{ExError, ExErrorKind};
/// let err = ExError::new(ExErrorKind::StoreUnavailable);
/// log_op_error!("save_snapshot", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: &$crate::errors::ExError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = buildstat_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_message = ex_err.message(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: &$crate::errors::ExError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = buildstat_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_message = ex_err.message(),
            $($field)*
        );
    }};
}
