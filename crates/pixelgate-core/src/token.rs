//! Access Tokens
//!
//! Opaque single-use tokens proving that a checkout was paid for.

use rand::{Rng, distributions::Alphanumeric, rngs::OsRng};
use serde::{Deserialize, Serialize};

/// Number of characters in a minted token
pub const TOKEN_LENGTH: usize = 32;

/// Access token (32 alphanumeric characters)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a token received from a client or a webhook payload
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the token as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix for log lines
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(6).collect();
        format!("{prefix}…")
    }
}

impl std::fmt::Display for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Token source
pub trait TokenGenerator: Send + Sync {
    /// Mint a fresh, unpaid token
    fn generate(&self) -> AccessToken;
}

/// Draws tokens from the operating system CSPRNG
#[derive(Clone, Copy, Debug, Default)]
pub struct SecureTokenGenerator;

impl TokenGenerator for SecureTokenGenerator {
    fn generate(&self) -> AccessToken {
        let token: String = OsRng
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect();
        AccessToken(token)
    }
}
