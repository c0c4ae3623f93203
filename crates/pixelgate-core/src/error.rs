//! Error Types

use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GateError>;

/// Gateway error types
#[derive(Error, Debug)]
pub enum GateError {
    /// Token missing, unknown or already consumed
    #[error("Access denied: {0}")]
    Unauthorized(String),

    /// Request payload failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Image API returned a non-success status or could not be reached
    #[error("Image provider error: {0}")]
    Provider(String),

    /// Image API answered successfully but without a usable image
    #[error("Unexpected provider response: {0}")]
    UnexpectedResponse(String),

    /// Token storage backend failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl GateError {
    /// Convert to a user-friendly message
    pub fn user_message(&self) -> &str {
        match self {
            Self::Unauthorized(_) => "Invalid or already used token.",
            Self::InvalidInput(_) => "Invalid prompt.",
            Self::Provider(_) => "Image generation failed.",
            Self::UnexpectedResponse(_) => "The image service returned no image.",
            _ => "An unexpected error occurred.",
        }
    }
}
