//! Router

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{
    cancelled_page, create_checkout, create_page, generate_image, health_check, landing_page,
    stripe_webhook, success_page,
};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Pages
        .route("/", get(landing_page))
        .route("/sucesso", get(success_page))
        .route("/cancelado", get(cancelled_page))
        .route("/criar", get(create_page))
        // Health
        .route("/health", get(health_check))
        // Payments
        .route("/pagar", post(create_checkout))
        .route("/webhook", post(stripe_webhook))
        // Generation
        .route("/api/generate", post(generate_image))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
