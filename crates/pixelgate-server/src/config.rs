//! Server Configuration
//!
//! Read once at startup. Missing secrets are logged but never stop the
//! server; the affected endpoints fail per request instead.

use pixelgate_runtime::OpenAiConfig;

/// Runtime configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub stripe_secret_key: String,
    pub stripe_webhook_secret: String,
    pub openai: OpenAiConfig,
    /// Public base URL used for checkout redirects
    pub public_url: String,
    pub port: u16,
}

impl ServerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let secret = |key: &str| {
            let value = lookup(key).unwrap_or_default();
            if value.is_empty() {
                tracing::warn!("⚠ {} not set", key);
            }
            value
        };

        let stripe_secret_key = secret("STRIPE_SECRET_KEY");
        let stripe_webhook_secret = secret("STRIPE_WEBHOOK_SECRET");

        let defaults = OpenAiConfig::default();
        let openai = OpenAiConfig {
            api_key: secret("OPENAI_API_KEY"),
            base_url: lookup("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            model: lookup("OPENAI_IMAGE_MODEL").unwrap_or(defaults.model),
            size: defaults.size,
        };

        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);
        let public_url = lookup("PUBLIC_URL")
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| format!("http://localhost:{port}"));

        Self {
            stripe_secret_key,
            stripe_webhook_secret,
            openai,
            public_url,
            port,
        }
    }
}
