//! Concurrent token storage with per-token fine-grained locking.
//!
//! [`TokenDirectory`] stores every registered token collaborator in a
//! `HashMap` where each entry is individually protected by a
//! [`tokio::sync::RwLock`]. This allows concurrent reads on the same
//! token and concurrent writes on different tokens; writes to the same
//! token are serialized.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::FungibleToken;
use crate::domain::AccountId;
use crate::error::DexError;

/// Shared handle to one registered token.
pub type TokenHandle = Arc<RwLock<Box<dyn FungibleToken>>>;

/// Address-keyed store of all token collaborators known to the exchange.
///
/// The exchange resolves every token address through this directory
/// before moving funds. Registration is write-once: a second token at
/// the same address is rejected, never replaced.
#[derive(Debug, Default)]
pub struct TokenDirectory {
    tokens: RwLock<HashMap<AccountId, TokenHandle>>,
}

impl TokenDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tokens: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a token under its own address.
    ///
    /// # Errors
    ///
    /// - [`DexError::ZeroAddress`] if the token reports the zero
    ///   sentinel as its address.
    /// - [`DexError::DuplicateToken`] if a token is already registered
    ///   at that address.
    pub async fn register(&self, token: Box<dyn FungibleToken>) -> Result<AccountId, DexError> {
        let address = token.address();
        if address.is_zero() {
            return Err(DexError::ZeroAddress);
        }
        let mut map = self.tokens.write().await;
        if map.contains_key(&address) {
            return Err(DexError::DuplicateToken(address));
        }
        map.insert(address, Arc::new(RwLock::new(token)));
        Ok(address)
    }

    /// Returns a shared handle to the token behind its per-token lock.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::TokenNotFound`] if no token is registered at
    /// `address`.
    pub async fn get(&self, address: AccountId) -> Result<TokenHandle, DexError> {
        let map = self.tokens.read().await;
        map.get(&address)
            .cloned()
            .ok_or(DexError::TokenNotFound(address))
    }

    /// Returns `true` if a token is registered at `address`.
    pub async fn contains(&self, address: AccountId) -> bool {
        self.tokens.read().await.contains_key(&address)
    }

    /// Returns the number of registered tokens.
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Returns `true` if no tokens are registered.
    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Amount;
    use crate::token::StandardToken;

    fn addr(byte: u8) -> AccountId {
        AccountId::from_bytes([byte; 32])
    }

    fn make_token(byte: u8) -> Box<dyn FungibleToken> {
        let Ok(token) = StandardToken::new(addr(byte)) else {
            panic!("valid token address");
        };
        Box::new(token)
    }

    #[tokio::test]
    async fn register_and_get() {
        let directory = TokenDirectory::new();
        let Ok(address) = directory.register(make_token(1)).await else {
            panic!("expected Ok");
        };
        assert_eq!(address, addr(1));
        assert!(directory.get(address).await.is_ok());
    }

    #[tokio::test]
    async fn get_unknown_address_fails() {
        let directory = TokenDirectory::new();
        assert_eq!(
            directory.get(addr(7)).await.map(|_| ()),
            Err(DexError::TokenNotFound(addr(7)))
        );
    }

    #[tokio::test]
    async fn duplicate_registration_rejected() {
        let directory = TokenDirectory::new();
        assert!(directory.register(make_token(1)).await.is_ok());
        assert_eq!(
            directory.register(make_token(1)).await,
            Err(DexError::DuplicateToken(addr(1)))
        );
        assert_eq!(directory.len().await, 1);
    }

    #[tokio::test]
    async fn registered_token_is_usable_through_its_handle() {
        let directory = TokenDirectory::new();
        let Ok(address) = directory.register(make_token(2)).await else {
            panic!("expected Ok");
        };
        let Ok(handle) = directory.get(address).await else {
            panic!("expected Ok");
        };
        {
            let mut token = handle.write().await;
            assert!(token.mint(addr(5), Amount::new(42)).is_ok());
        }
        let token = handle.read().await;
        assert_eq!(token.balance_of(addr(5)), Amount::new(42));
    }

    #[tokio::test]
    async fn len_and_is_empty() {
        let directory = TokenDirectory::new();
        assert!(directory.is_empty().await);
        assert!(directory.register(make_token(1)).await.is_ok());
        assert!(directory.register(make_token(2)).await.is_ok());
        assert_eq!(directory.len().await, 2);
        assert!(directory.contains(addr(2)).await);
        assert!(!directory.contains(addr(3)).await);
    }
}
