//! Errors raised while building world objects.

use thiserror::Error;

/// Configuration errors for cameras and lights.
///
/// Geometry never produces an error: degenerate shapes simply miss.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid screen resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Invalid field of view half angle: {0} degrees (expected 0 < angle < 90)")]
    InvalidFieldOfView(f32),

    #[error("Light direction must be a non-zero vector")]
    ZeroDirection,
}

/// Result type for world object construction.
pub type CoreResult<T> = Result<T, CoreError>;
