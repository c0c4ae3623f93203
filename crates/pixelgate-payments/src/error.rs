//! Payment Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Stripe API error
    #[error("Stripe error: {0}")]
    Stripe(String),

    /// Webhook signature verification failed
    #[error("Webhook signature invalid: {0}")]
    WebhookSignature(String),

    /// Webhook payload parsing failed
    #[error("Webhook parse error: {0}")]
    WebhookParse(String),

    /// Token store rejected the update
    #[error("Storage error: {0}")]
    Storage(#[from] pixelgate_core::GateError),
}

impl PaymentError {
    /// Get user-friendly message
    pub fn user_message(&self) -> &str {
        match self {
            Self::Stripe(_) => "Payment processing failed. Please try again.",
            Self::WebhookSignature(_) => "Invalid signature.",
            Self::WebhookParse(_) => "Invalid webhook payload.",
            Self::Storage(_) => "An error occurred processing your request.",
        }
    }

    /// Whether the sender should be told the request itself was bad
    pub const fn is_bad_request(&self) -> bool {
        matches!(self, Self::WebhookSignature(_) | Self::WebhookParse(_))
    }
}
