//! Token Storage
//!
//! Holds tokens whose payment was confirmed and that have not been used yet.

use std::collections::HashSet;
use std::sync::RwLock;

use crate::error::{GateError, Result};
use crate::token::AccessToken;

/// Token storage trait
///
/// Membership means "payment confirmed, generation not yet used".
pub trait TokenStore: Send + Sync {
    /// Check whether a token is currently valid
    fn contains(&self, token: &AccessToken) -> Result<bool>;

    /// Mark a token as paid
    fn insert(&self, token: &AccessToken) -> Result<()>;

    /// Consume a token; returns whether it was present
    fn remove(&self, token: &AccessToken) -> Result<bool>;
}

/// In-memory token store (process lifetime, no expiry)
pub struct MemoryTokenStore {
    tokens: RwLock<HashSet<AccessToken>>,
}

impl Default for MemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            tokens: RwLock::new(HashSet::new()),
        }
    }

    /// Number of valid tokens
    pub fn len(&self) -> usize {
        self.tokens.read().map_or(0, |t| t.len())
    }

    /// Whether no token is currently valid
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<E>(_: E) -> GateError {
    GateError::Storage("token store lock poisoned".into())
}

impl TokenStore for MemoryTokenStore {
    fn contains(&self, token: &AccessToken) -> Result<bool> {
        let tokens = self.tokens.read().map_err(poisoned)?;
        Ok(tokens.contains(token))
    }

    fn insert(&self, token: &AccessToken) -> Result<()> {
        let mut tokens = self.tokens.write().map_err(poisoned)?;
        tokens.insert(token.clone());
        Ok(())
    }

    fn remove(&self, token: &AccessToken) -> Result<bool> {
        let mut tokens = self.tokens.write().map_err(poisoned)?;
        Ok(tokens.remove(token))
    }
}
