//! Image Provider Strategy Pattern
//!
//! Common interface for image-generation backends so the gateway does not
//! depend on a specific vendor.

use async_trait::async_trait;
use serde::{Serialize, Serializer};

use crate::error::Result;

/// Image returned by a provider
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeneratedImage {
    /// Inline image, `data:image/png;base64,...`
    DataUri(String),

    /// Image hosted by the provider
    Url(String),
}

impl GeneratedImage {
    /// Build an inline PNG from base64 data
    pub fn from_base64_png(b64: &str) -> Self {
        Self::DataUri(format!("data:image/png;base64,{b64}"))
    }

    /// The data URI or URL, as sent to clients
    pub fn as_str(&self) -> &str {
        match self {
            Self::DataUri(s) | Self::Url(s) => s,
        }
    }
}

impl Serialize for GeneratedImage {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Image-generation backend
///
/// `generate` performs exactly one upstream call. A non-success upstream
/// status is `GateError::Provider`; a success without image data is
/// `GateError::UnexpectedResponse`.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generate one image from an already composed prompt
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage>;

    /// Whether credentials are present
    fn is_configured(&self) -> bool;

    /// Provider name
    fn name(&self) -> &str;
}
