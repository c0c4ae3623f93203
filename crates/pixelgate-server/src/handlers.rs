//! HTTP Handlers

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::Html,
};
use pixelgate_core::{AccessToken, GateError, GeneratedImage, compose_prompt};
use pixelgate_payments::CheckoutRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pages;
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub stripe_configured: bool,
    pub images_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub image: GeneratedImage,
}

#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub received: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreatePageQuery {
    #[serde(default)]
    pub token: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>, details: Option<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            details,
        }),
    )
}

fn storage_error(e: &GateError) -> ApiError {
    tracing::error!("Token store error: {}", e);
    api_error(StatusCode::INTERNAL_SERVER_ERROR, e.user_message(), None)
}

// ============================================================================
// Pages
// ============================================================================

pub async fn landing_page() -> Html<&'static str> {
    Html(pages::LANDING)
}

pub async fn success_page() -> Html<&'static str> {
    Html(pages::SUCCESS)
}

pub async fn cancelled_page() -> Html<&'static str> {
    Html(pages::CANCELLED)
}

/// Creation page, only for paid and unused tokens
pub async fn create_page(
    State(state): State<AppState>,
    Query(query): Query<CreatePageQuery>,
) -> (StatusCode, Html<&'static str>) {
    let Some(token) = query.token.filter(|t| !t.is_empty()).map(AccessToken::from_string) else {
        return (StatusCode::FORBIDDEN, Html(pages::DENIED));
    };

    match state.token_store.contains(&token) {
        Ok(true) => (StatusCode::OK, Html(pages::CREATE)),
        Ok(false) => (StatusCode::FORBIDDEN, Html(pages::DENIED)),
        Err(e) => {
            tracing::error!("Token store error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Html(pages::DENIED))
        }
    }
}

// ============================================================================
// API
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        stripe_configured: state.checkout.is_configured(),
        images_configured: state.images.is_configured(),
    })
}

/// Create a Stripe checkout session carrying a fresh token
pub async fn create_checkout(
    State(state): State<AppState>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let token = state.tokens.generate();
    let request = CheckoutRequest::new(token, &state.public_url);

    let session = state
        .checkout
        .create_checkout_session(request)
        .await
        .map_err(|e| {
            tracing::error!("Checkout error: {}", e);
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create checkout session",
                Some(e.to_string()),
            )
        })?;

    Ok(Json(CheckoutResponse {
        url: session.checkout_url,
    }))
}

/// Token-gated image generation; a successful upstream call consumes the token
pub async fn generate_image(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let body = payload.map(|Json(v)| v).unwrap_or(Value::Null);

    let token = body
        .get("token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(AccessToken::from_string)
        .ok_or_else(|| api_error(StatusCode::FORBIDDEN, "Invalid or already used token", None))?;

    // Validation and consumption are separate steps; concurrent requests
    // with the same token can both pass this check.
    if !state.token_store.contains(&token).map_err(|e| storage_error(&e))? {
        tracing::info!(token = %token.redacted(), "Rejected unknown token");
        return Err(api_error(StatusCode::FORBIDDEN, "Invalid or already used token", None));
    }

    let prompt = body
        .get("prompt")
        .and_then(Value::as_str)
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Prompt must be a string", None))?;

    let composed = compose_prompt(prompt);
    let result = state.images.generate(&composed).await;

    if let Err(GateError::Provider(text)) = &result {
        tracing::error!(provider = state.images.name(), "Image generation failed: {}", text);
        return Err(api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Image generation failed",
            Some(text.clone()),
        ));
    }

    // Upstream succeeded: the token is spent whether or not an image came back.
    // An image is never handed out while its token stays valid.
    state.token_store.remove(&token).map_err(|e| {
        tracing::error!(token = %token.redacted(), "Failed to consume token: {}", e);
        api_error(StatusCode::INTERNAL_SERVER_ERROR, e.user_message(), None)
    })?;
    tracing::info!(token = %token.redacted(), "Consumed access token");

    match result {
        Ok(image) => Ok(Json(GenerateResponse { image })),
        Err(e) => {
            tracing::error!("Unusable image response: {}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e.user_message(), None))
        }
    }
}

/// Stripe webhook handler
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponse>, ApiError> {
    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Missing Stripe signature", None))?;

    state.webhooks.process(&body, signature).map_err(|e| {
        if e.is_bad_request() {
            tracing::warn!("Webhook rejected: {}", e);
            api_error(StatusCode::BAD_REQUEST, e.user_message(), Some(e.to_string()))
        } else {
            tracing::error!("Webhook processing error: {}", e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Webhook processing failed", None)
        }
    })?;

    Ok(Json(WebhookResponse { received: true }))
}
