//! # pixelgate-payments
//!
//! Stripe Checkout (hosted) integration and webhook-driven token issuance.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌─────────────┐
//! │  POST       │────▶│  Stripe Hosted  │────▶│  /sucesso   │
//! │  /pagar     │     │  Checkout Page  │     │             │
//! └─────────────┘     └────────┬────────┘     └─────────────┘
//!                              │ checkout.session.completed
//!                              ▼
//!                     ┌─────────────────┐     ┌─────────────┐
//!                     │  POST /webhook  │────▶│ TokenStore  │
//!                     └─────────────────┘     └─────────────┘
//! ```
//!
//! The access token travels in the session metadata, so nothing is stored
//! locally until Stripe confirms the payment.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pixelgate_payments::{CheckoutProvider, CheckoutRequest, StripeClient};
//!
//! let client = StripeClient::new("sk_test_xxx");
//! let token = SecureTokenGenerator.generate();
//! let session = client
//!     .create_checkout_session(CheckoutRequest::new(token, "https://yoursite.com"))
//!     .await?;
//!
//! // Redirect user to: session.checkout_url
//! ```

mod checkout;
mod error;
mod webhook;

pub use checkout::{
    CheckoutProvider, CheckoutRequest, CheckoutSession, PIXEL_ART, ProductPricing, StripeClient,
    TOKEN_METADATA_KEY,
};
pub use error::{PaymentError, Result};
pub use webhook::{
    CHECKOUT_COMPLETED, SIGNATURE_TOLERANCE_SECS, WebhookEvent, WebhookHandler, verify_signature,
};
