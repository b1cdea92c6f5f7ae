//! Cursor error types

use thiserror::Error;

use super::surface::PixelFormat;

/// Result type for cursor operations
pub type Result<T> = std::result::Result<T, CursorError>;

/// Cursor module error types
#[derive(Error, Debug)]
pub enum CursorError {
    /// Platform capability absent or platform call failed
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Allocation failed while building cursor data
    #[error("Out of memory: {0}")]
    OutOfMemory(String),

    /// Bitmap could not be converted to ARGB8888
    #[error("Unsupported pixel format: {0:?}")]
    UnsupportedFormat(PixelFormat),

    /// Bitmap dimensions and buffer disagree
    #[error("Invalid surface: {0}")]
    InvalidSurface(String),
}

impl CursorError {
    /// Whether the caller should treat this as "not supported".
    ///
    /// Conversion failures are reported to callers the same way as a
    /// platform refusal.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            CursorError::Unsupported(_) | CursorError::UnsupportedFormat(_)
        )
    }
}
