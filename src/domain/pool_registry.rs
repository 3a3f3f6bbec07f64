//! Concurrent pool storage with per-pool fine-grained locking.
//!
//! [`PoolRegistry`] is the exchange's directory: a write-once map from
//! the canonical [`PairKey`] to the pool's address, plus the pool
//! storage itself, where each pool is individually protected by a
//! [`tokio::sync::RwLock`]. Reads on the same pool are concurrent;
//! writes to the same pool are serialized; different pools never
//! contend — independent pools share no state.
//!
//! Pools are never destroyed: there is no removal. A drained pool stays
//! in the directory in its empty state and can be re-funded.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::{AccountId, PairKey};
use crate::error::DexError;
use crate::pool::{LiquidityPool, PoolSummary};

/// Shared handle to one registered pool.
pub type PoolHandle = Arc<RwLock<LiquidityPool>>;

/// Directory of all pools, keyed by unordered pair and by address.
#[derive(Debug, Default)]
pub struct PoolRegistry {
    /// Write-once directory: canonical pair → pool address.
    pairs: RwLock<HashMap<PairKey, AccountId>>,
    /// Pool storage: pool address → per-pool locked state.
    pools: RwLock<HashMap<AccountId, PoolHandle>>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pairs: RwLock::new(HashMap::new()),
            pools: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts a new pool under its pair key and address.
    ///
    /// Directory entries are write-once: the insert claims the pair
    /// before publishing the pool, so a second pool for the same
    /// unordered pair (in either argument order) is impossible.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::DuplicatePair`] carrying the existing pool's
    /// address if the pair is already taken.
    pub async fn insert(&self, pair: PairKey, pool: LiquidityPool) -> Result<(), DexError> {
        let address = pool.address();
        let mut pairs = self.pairs.write().await;
        if let Some(existing) = pairs.get(&pair) {
            return Err(DexError::DuplicatePair(*existing));
        }
        pairs.insert(pair, address);

        let mut pools = self.pools.write().await;
        pools.insert(address, Arc::new(RwLock::new(pool)));
        Ok(())
    }

    /// Returns the pool entry behind its per-pool lock.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::PoolNotFound`] if no pool lives at `address`.
    pub async fn get(&self, address: AccountId) -> Result<PoolHandle, DexError> {
        let pools = self.pools.read().await;
        pools
            .get(&address)
            .cloned()
            .ok_or(DexError::PoolNotFound(address))
    }

    /// Looks up the pool address recorded for an unordered pair.
    pub async fn pool_of_pair(&self, pair: PairKey) -> Option<AccountId> {
        self.pairs.read().await.get(&pair).copied()
    }

    /// Returns `true` if a pool exists for the unordered pair.
    pub async fn contains_pair(&self, pair: PairKey) -> bool {
        self.pairs.read().await.contains_key(&pair)
    }

    /// Returns summaries of all pools.
    pub async fn list(&self) -> Vec<PoolSummary> {
        let pools = self.pools.read().await;
        let mut summaries = Vec::with_capacity(pools.len());
        for handle in pools.values() {
            let pool = handle.read().await;
            summaries.push(PoolSummary::from(&*pool));
        }
        summaries
    }

    /// Returns the number of registered pools.
    pub async fn len(&self) -> usize {
        self.pools.read().await.len()
    }

    /// Returns `true` if the registry holds no pools.
    pub async fn is_empty(&self) -> bool {
        self.pools.read().await.is_empty()
    }
}
