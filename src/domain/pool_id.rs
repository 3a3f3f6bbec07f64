//! Type-safe pool identifier and address derivation.
//!
//! [`PoolId`] is a newtype wrapper around [`uuid::Uuid`] (v4). Besides
//! type safety it is the seed from which a pool's two ledger addresses
//! (the pool account and its liquidity-share token) are derived.

use std::fmt;

use serde::Serialize;

use super::AccountId;

/// Tag byte marking a derived pool account address.
const POOL_ADDRESS_TAG: u8 = b'P';

/// Tag byte marking a derived liquidity-share token address.
const SHARE_ADDRESS_TAG: u8 = b'L';

/// Unique identifier for a liquidity pool.
///
/// Wraps a UUID v4, generated once at pool creation time and immutable
/// thereafter. The pool's ledger address and its share token's address
/// are both derived deterministically from this id, so they can never
/// collide with each other and (UUID v4 version bits) never equal the
/// zero sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PoolId(uuid::Uuid);

impl PoolId {
    /// Creates a new random `PoolId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `PoolId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }

    /// Derives the pool's own ledger address.
    #[must_use]
    pub fn pool_address(&self) -> AccountId {
        self.derive(POOL_ADDRESS_TAG)
    }

    /// Derives the address of the pool's liquidity-share token.
    #[must_use]
    pub fn share_address(&self) -> AccountId {
        self.derive(SHARE_ADDRESS_TAG)
    }

    /// Embeds the 16 uuid bytes and a role tag into a 32-byte address.
    fn derive(&self, tag: u8) -> AccountId {
        let mut bytes = [0u8; 32];
        for (dst, src) in bytes.iter_mut().zip(self.0.as_bytes()) {
            *dst = *src;
        }
        if let Some(last) = bytes.last_mut() {
            *last = tag;
        }
        AccountId::from_bytes(bytes)
    }
}

impl Default for PoolId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
