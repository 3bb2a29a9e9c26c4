//! Error types for decomment.

use thiserror::Error;

/// Result type for decomment operations.
pub type Result<T> = std::result::Result<T, DecommentError>;

/// Main error type for decomment.
///
/// The stripping strategies themselves are total and never fail, and the
/// processor logs and counts per-file failures instead of propagating them;
/// errors only arise while resolving the run configuration.
#[derive(Error, Debug)]
pub enum DecommentError {
    /// Invalid exclude glob pattern
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] globset::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
