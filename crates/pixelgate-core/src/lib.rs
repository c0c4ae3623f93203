//! # pixelgate-core
//!
//! Building blocks shared by the pixelgate payment gateway and server.
//!
//! ## Token lifecycle
//!
//! ```text
//! ┌──────────┐  webhook   ┌──────────┐  generate  ┌──────────┐
//! │  minted  │───────────▶│  stored  │───────────▶│ consumed │
//! │ (unpaid) │  (paid)    │  (valid) │  (1 call)  │ (gone)   │
//! └──────────┘            └──────────┘            └──────────┘
//! ```
//!
//! The `TokenStore` and `TokenGenerator` traits are the seams for swapping the
//! in-memory set for a shared key-value store, or the token source for another
//! generator, without touching the HTTP layer. `ImageProvider` does the same
//! for the upstream image API.

pub mod error;
pub mod prompt;
pub mod provider;
pub mod store;
pub mod token;

pub use error::{GateError, Result};
pub use prompt::{compose_prompt, sanitize_prompt};
pub use provider::{GeneratedImage, ImageProvider};
pub use store::{MemoryTokenStore, TokenStore};
pub use token::{AccessToken, SecureTokenGenerator, TokenGenerator};
