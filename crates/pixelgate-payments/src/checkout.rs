//! Stripe Checkout Integration
//!
//! Creates hosted one-time-payment sessions carrying a freshly minted access
//! token in their metadata.

use std::collections::HashMap;

use async_trait::async_trait;
use pixelgate_core::AccessToken;
use serde::{Deserialize, Serialize};
use stripe::{
    CheckoutSession as StripeCheckoutSession, CheckoutSessionMode, Client,
    CreateCheckoutSession, CreateCheckoutSessionLineItems,
    CreateCheckoutSessionLineItemsPriceData,
    CreateCheckoutSessionLineItemsPriceDataProductData, Currency,
};

use crate::error::{PaymentError, Result};

/// Metadata key holding the access token
pub const TOKEN_METADATA_KEY: &str = "token";

/// Fixed product pricing
#[derive(Clone, Debug)]
pub struct ProductPricing {
    pub name: &'static str,
    pub description: &'static str,
    pub cents: i64,
    pub currency: Currency,
}

/// The single product on sale: one generated image
pub const PIXEL_ART: ProductPricing = ProductPricing {
    name: "Pixel art personalizada",
    description: "Uma imagem em pixel art gerada a partir da sua descrição",
    cents: 500, // R$ 5,00
    currency: Currency::BRL,
};

/// Request to create a checkout session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Token to activate once the session is paid
    pub token: AccessToken,

    /// URL to redirect after successful payment
    pub success_url: String,

    /// URL to redirect if checkout is cancelled
    pub cancel_url: String,
}

impl CheckoutRequest {
    /// Build a request with the standard redirect pages under `public_url`
    pub fn new(token: AccessToken, public_url: &str) -> Self {
        let base = public_url.trim_end_matches('/');
        Self {
            success_url: format!("{base}/sucesso?token={token}"),
            cancel_url: format!("{base}/cancelado"),
            token,
        }
    }
}

/// Result of creating a checkout session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Stripe session ID
    pub id: String,

    /// URL to redirect user to
    pub checkout_url: String,

    /// Token embedded in the session metadata
    pub token: AccessToken,
}

/// Hosted checkout backend
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Create a hosted checkout session; no retry on failure
    async fn create_checkout_session(&self, request: CheckoutRequest) -> Result<CheckoutSession>;

    /// Whether an API key is present
    fn is_configured(&self) -> bool;
}

/// Stripe client wrapper
pub struct StripeClient {
    client: Client,
    configured: bool,
}

impl StripeClient {
    /// Create a new Stripe client
    pub fn new(secret_key: &str) -> Self {
        Self {
            client: Client::new(secret_key),
            configured: !secret_key.is_empty(),
        }
    }
}

#[async_trait]
impl CheckoutProvider for StripeClient {
    async fn create_checkout_session(&self, request: CheckoutRequest) -> Result<CheckoutSession> {
        let pricing = &PIXEL_ART;

        let mut params = CreateCheckoutSession::new();
        params.success_url = Some(&request.success_url);
        params.cancel_url = Some(&request.cancel_url);
        params.mode = Some(CheckoutSessionMode::Payment);

        let mut metadata = HashMap::new();
        metadata.insert(TOKEN_METADATA_KEY.to_string(), request.token.to_string());
        params.metadata = Some(metadata);

        params.line_items = Some(vec![CreateCheckoutSessionLineItems {
            quantity: Some(1),
            price_data: Some(CreateCheckoutSessionLineItemsPriceData {
                currency: pricing.currency,
                unit_amount: Some(pricing.cents),
                product_data: Some(CreateCheckoutSessionLineItemsPriceDataProductData {
                    name: pricing.name.to_string(),
                    description: Some(pricing.description.to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }]);

        let session = StripeCheckoutSession::create(&self.client, params)
            .await
            .map_err(|e| PaymentError::Stripe(e.to_string()))?;

        let checkout_url = session
            .url
            .ok_or_else(|| PaymentError::Stripe("No checkout URL returned".into()))?;

        tracing::info!(
            session_id = %session.id,
            token = %request.token.redacted(),
            "Created checkout session"
        );

        Ok(CheckoutSession {
            id: session.id.to_string(),
            checkout_url,
            token: request.token,
        })
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}
