//! Renderer errors.

use thiserror::Error;
use whitted_core::CoreError;

/// Errors that can occur while configuring, loading or presenting a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Scene setup error: {0}")]
    Core(#[from] CoreError),

    #[error("No scene with index {index} ({available} available)")]
    UnknownScene { index: usize, available: usize },

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Pixel sink failed to initialise: {0}")]
    SinkInit(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;
