//! # pixelgate-runtime
//!
//! Image-generation providers for pixelgate.
//!
//! ## Providers
//!
//! - **OpenAI** (default): Images API (`/images/generations`)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pixelgate_runtime::OpenAiImageProvider;
//!
//! let provider = OpenAiImageProvider::from_config(OpenAiConfig::new("sk-..."));
//! let image = provider.generate(&compose_prompt("dragon")).await?;
//! ```

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "openai")]
pub use openai::{OpenAiConfig, OpenAiImageProvider};

// Re-export core types for convenience
pub use pixelgate_core::{GateError, GeneratedImage, ImageProvider, Result};
