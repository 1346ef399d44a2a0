/// Convenience result type used across the photo booth.
pub type PhotoboothResult<T> = Result<T, PhotoboothError>;

/// Error taxonomy shared by capture, compositing and export.
#[derive(thiserror::Error, Debug)]
pub enum PhotoboothError {
    /// Camera permission denied, no device, or the stream dropped.
    #[error("camera access error: {0}")]
    CameraAccess(String),

    /// The source image could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The raster encoder rejected the output surface.
    #[error("encode error: {0}")]
    Encode(String),

    /// The platform refused the clipboard write.
    #[error("clipboard error: {0}")]
    Clipboard(String),

    /// The print surface could not be opened (e.g. a blocked popup).
    #[error("print surface unavailable: {0}")]
    PrintSurfaceUnavailable(String),

    /// Invalid caller-provided data or a violated precondition.
    #[error("validation error: {0}")]
    Validation(String),

    /// Filesystem errors from export sinks.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PhotoboothError {
    /// Build a [`PhotoboothError::CameraAccess`] value.
    pub fn camera(msg: impl Into<String>) -> Self {
        Self::CameraAccess(msg.into())
    }

    /// Build a [`PhotoboothError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PhotoboothError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`PhotoboothError::Clipboard`] value.
    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self::Clipboard(msg.into())
    }

    /// Build a [`PhotoboothError::PrintSurfaceUnavailable`] value.
    pub fn print_surface(msg: impl Into<String>) -> Self {
        Self::PrintSurfaceUnavailable(msg.into())
    }

    /// Build a [`PhotoboothError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
