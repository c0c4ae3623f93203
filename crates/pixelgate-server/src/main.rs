//! pixelgate HTTP Server
//!
//! Pay once through Stripe Checkout, generate one pixel-art image.

mod config;
mod handlers;
mod pages;
mod routes;
mod state;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pixelgate_core::{MemoryTokenStore, SecureTokenGenerator};
use pixelgate_payments::{StripeClient, WebhookHandler};
use pixelgate_runtime::OpenAiImageProvider;

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env();

    let token_store = Arc::new(MemoryTokenStore::new());

    let stripe = StripeClient::new(&config.stripe_secret_key);
    if !config.stripe_secret_key.is_empty() && !config.stripe_webhook_secret.is_empty() {
        tracing::info!("✓ Stripe configured");
    } else {
        tracing::warn!("⚠ Stripe not fully configured - checkout or webhooks will fail");
    }

    let images = OpenAiImageProvider::from_config(config.openai.clone());
    if config.openai.api_key.is_empty() {
        tracing::warn!("⚠ Image API not configured - generation will fail");
    } else {
        tracing::info!("✓ Image API configured (model {})", config.openai.model);
    }

    let state = AppState {
        token_store: token_store.clone(),
        tokens: Arc::new(SecureTokenGenerator),
        checkout: Arc::new(stripe),
        webhooks: Arc::new(WebhookHandler::new(token_store, config.stripe_webhook_secret.clone())),
        images: Arc::new(images),
        public_url: config.public_url.clone(),
    };

    let app = routes::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🚀 pixelgate running on http://{} (public URL {})", addr, config.public_url);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /              - Landing page");
    tracing::info!("  POST /pagar         - Create Stripe checkout");
    tracing::info!("  POST /webhook       - Stripe webhook");
    tracing::info!("  GET  /criar         - Creation page (token required)");
    tracing::info!("  POST /api/generate  - Generate image (consumes token)");

    axum::serve(listener, app).await?;

    Ok(())
}
