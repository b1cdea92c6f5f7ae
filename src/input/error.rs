//! Input Handling Error Types
//!
//! Error handling for pointer translation and event delivery.

use thiserror::Error;

/// Result type for input operations
pub type Result<T> = std::result::Result<T, InputError>;

/// Input module error types
#[derive(Error, Debug)]
pub enum InputError {
    /// Action code not understood by the translator
    #[error("Unknown pointer action code: {0}")]
    UnknownAction(i32),

    /// The owning event system rejected or dropped an event
    #[error("Failed to send event")]
    EventSendFailed,

    /// Invalid state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            InputError::UnknownAction(5).to_string(),
            "Unknown pointer action code: 5"
        );
    }
}
