//! Tracing utilities for query and materialization observability.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! These macros no-op when the feature is disabled, avoiding `#[cfg]` boilerplate
//! at every call site. The `cfg` is evaluated in the calling crate, so callers
//! need a `tracing` feature of their own.

/// Emit a debug-level tracing event with the SQL text and parameter count.
///
/// ```ignore
/// canopy_trace_query!(statement.sql(), statement.params().len());
/// ```
#[macro_export]
macro_rules! canopy_trace_query {
    ($sql:expr, $param_count:expr) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(sql = %$sql, params = $param_count, "canopy.query");
    };
}

/// Emit a debug-level tracing event after rows were wired into a forest.
///
/// ```ignore
/// canopy_trace_forest!(rows, top_level);
/// ```
#[macro_export]
macro_rules! canopy_trace_forest {
    ($rows:expr, $top_level:expr) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(rows = $rows, top_level = $top_level, "canopy.materialize");
    };
}
