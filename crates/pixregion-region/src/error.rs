//! Error types for pixregion-region

use thiserror::Error;

/// Errors that can occur during region processing operations
///
/// Fills that have nothing to do are successful no-ops, not errors.
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixregion_core::Error),

    /// Seed position outside the image
    #[error("invalid seed position: ({x}, {y})")]
    InvalidSeed { x: i32, y: i32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
