/// Convenience result type used across softraster.
pub type RasterResult<T> = Result<T, RasterError>;

/// Top-level error taxonomy used by pipeline, loader and sink APIs.
///
/// The rasterization stages themselves never fail: degenerate geometry is rejected silently.
/// Errors only surface at the edges (configuration, draw input, worker threads, IO).
#[derive(thiserror::Error, Debug)]
pub enum RasterError {
    /// Invalid user-provided configuration or draw input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Worker pool failures (spawn errors, panicking shader tasks).
    #[error("pipeline error: {0}")]
    Pipeline(String),

    /// Malformed mesh or texture data.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Filesystem or device IO.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RasterError {
    /// Build a [`RasterError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RasterError::Pipeline`] value.
    pub fn pipeline(msg: impl Into<String>) -> Self {
        Self::Pipeline(msg.into())
    }

    /// Build a [`RasterError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`RasterError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
