//! Error types for packed_life.

use thiserror::Error;

/// Errors surfaced by board configuration, seeding and cell access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    /// Invalid dimensions, section counts or other board settings.
    #[error("config error: {0}")]
    Config(String),

    /// A coordinate outside the board.
    #[error("cell ({x}, {y}) is outside the {width}x{height} board")]
    OutOfRange {
        /// Requested column.
        x: usize,
        /// Requested row.
        y: usize,
        /// Board width.
        width: usize,
        /// Board height.
        height: usize,
    },

    /// Malformed kernel weights or rule string.
    #[error("kernel error: {0}")]
    Kernel(String),

    /// A compute backend could not be set up.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result type for packed_life operations.
pub type LifeResult<T> = Result<T, LifeError>;

impl LifeError {
    /// Create a config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a kernel error.
    pub fn kernel(msg: impl Into<String>) -> Self {
        Self::Kernel(msg.into())
    }

    /// Create a backend error.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
