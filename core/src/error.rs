use thiserror::Error;

#[derive(Debug, Error)]
pub enum CanopyError {
    /// A requested tree could not be resolved to a top-level node
    #[error("No rows found")]
    NotFound,

    /// Unknown option, invalid identifier or malformed order term
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Error mapping a row into a record
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// Rusqlite specific errors
    #[cfg(feature = "rusqlite")]
    #[error("Rusqlite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),

    /// Postgres specific errors
    #[cfg(feature = "postgres-sync")]
    #[error("Postgres error: {0}")]
    Postgres(#[from] postgres::Error),
}

/// Result type for forest operations
pub type Result<T> = std::result::Result<T, CanopyError>;
