//! Application State

use std::sync::Arc;

use pixelgate_core::{ImageProvider, TokenGenerator, TokenStore};
use pixelgate_payments::{CheckoutProvider, WebhookHandler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Paid, unused tokens
    pub token_store: Arc<dyn TokenStore>,

    /// Source of new tokens
    pub tokens: Arc<dyn TokenGenerator>,

    /// Hosted checkout backend (Stripe)
    pub checkout: Arc<dyn CheckoutProvider>,

    /// Webhook verification and token activation
    pub webhooks: Arc<WebhookHandler>,

    /// Image-generation backend (OpenAI)
    pub images: Arc<dyn ImageProvider>,

    /// Public base URL for checkout redirects
    pub public_url: String,
}
