//! OpenAI Image Provider
//!
//! Implementation of `ImageProvider` for the OpenAI Images API.

use async_trait::async_trait;
use pixelgate_core::{
    error::{GateError, Result},
    provider::{GeneratedImage, ImageProvider},
};
use serde::{Deserialize, Serialize};

/// OpenAI provider configuration
#[derive(Clone, Debug)]
pub struct OpenAiConfig {
    /// API key (empty when not configured)
    pub api_key: String,

    /// API base URL, without trailing slash
    pub base_url: String,

    /// Image model
    pub model: String,

    /// Output size
    pub size: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".into(),
            model: "dall-e-3".into(),
            size: "1024x1024".into(),
        }
    }
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
    response_format: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    b64_json: Option<String>,
    url: Option<String>,
}

/// OpenAI image provider
pub struct OpenAiImageProvider {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiImageProvider {
    /// Create from configuration
    pub fn from_config(config: OpenAiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/images/generations", self.config.base_url.trim_end_matches('/'))
    }

    /// Pick the first usable image from a success payload
    fn extract_image(response: ImageResponse) -> Result<GeneratedImage> {
        let first = response.data.into_iter().next();
        match first {
            Some(ImageData {
                b64_json: Some(b64), ..
            }) if !b64.is_empty() => Ok(GeneratedImage::from_base64_png(&b64)),
            Some(ImageData { url: Some(url), .. }) if !url.is_empty() => {
                Ok(GeneratedImage::Url(url))
            }
            _ => Err(GateError::UnexpectedResponse(
                "response has neither b64_json nor url".into(),
            )),
        }
    }
}

#[async_trait]
impl ImageProvider for OpenAiImageProvider {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage> {
        let request = ImageRequest {
            model: &self.config.model,
            prompt,
            n: 1,
            size: &self.config.size,
            response_format: "b64_json",
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GateError::Provider(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Image API returned an error");
            return Err(GateError::Provider(format!("{status}: {text}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GateError::UnexpectedResponse(e.to_string()))?;
        let parsed: ImageResponse = serde_json::from_str(&body)
            .map_err(|e| GateError::UnexpectedResponse(e.to_string()))?;

        Self::extract_image(parsed)
    }

    fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    fn name(&self) -> &str {
        "OpenAI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn provider(base_url: String) -> OpenAiImageProvider {
        OpenAiImageProvider::from_config(OpenAiConfig {
            api_key: "sk-test".into(),
            base_url,
            ..Default::default()
        })
    }

    #[test]
    fn test_config_defaults() {
        let config = OpenAiConfig::default();
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "dall-e-3");
        assert!(!OpenAiImageProvider::from_config(config).is_configured());
    }

    #[tokio::test]
    async fn test_b64_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/images/generations")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "prompt": "a dragon",
                "n": 1
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"created":1,"data":[{"b64_json":"QUJD"}]}"#)
            .create_async()
            .await;

        let image = provider(server.url()).generate("a dragon").await.unwrap();
        assert_eq!(image, GeneratedImage::DataUri("data:image/png;base64,QUJD".into()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_url_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/images/generations")
            .with_status(200)
            .with_body(r#"{"data":[{"url":"https://img.example/1.png"}]}"#)
            .create_async()
            .await;

        let image = provider(server.url()).generate("x").await.unwrap();
        assert_eq!(image, GeneratedImage::Url("https://img.example/1.png".into()));
    }

    #[tokio::test]
    async fn test_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/images/generations")
            .with_status(400)
            .with_body(r#"{"error":{"message":"content policy"}}"#)
            .create_async()
            .await;

        let err = provider(server.url()).generate("x").await.unwrap_err();
        match err {
            GateError::Provider(text) => assert!(text.contains("content policy")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_image_fields() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/images/generations")
            .with_status(200)
            .with_body(r#"{"data":[{}]}"#)
            .create_async()
            .await;

        let err = provider(server.url()).generate("x").await.unwrap_err();
        assert!(matches!(err, GateError::UnexpectedResponse(_)));
    }
}
