//! Exchange service: orchestrates pool operations and emits events.
//!
//! Every public operation is one atomic unit. The pattern is always:
//! validate → acquire the pool's write lock → pull inbound token legs →
//! apply the pool state transition → push outbound token legs → emit
//! events. Internal state is committed **before** any outbound token
//! call, and a failed leg triggers an explicit rollback: the pool is
//! restored from a pre-transition checkpoint and completed legs are
//! compensated with reverse transfers. Lock order is always pool →
//! token, each token leg in its own scope, so operations on one pool
//! serialize while independent pools proceed concurrently.

use std::sync::Arc;

use chrono::Utc;

use crate::config::DexConfig;
use crate::domain::{AccountId, Amount, EventBus, PairKey, PoolEvent, PoolId, PoolRegistry};
use crate::error::DexError;
use crate::pool::{LiquidityPool, PoolSummary};
use crate::token::{TokenDirectory, TokenHandle};

/// Undoes a completed `transfer_from` pull: returns the funds from
/// `source` to `owner` and restores the allowance the pull consumed.
async fn refund_pull(
    handle: &TokenHandle,
    owner: AccountId,
    spender: AccountId,
    source: AccountId,
    value: Amount,
) {
    let mut token = handle.write().await;
    let _ = token.transfer(source, owner, value);
    let prior = token.allowance(owner, spender);
    let restored = prior.checked_add(value).unwrap_or(prior);
    let _ = token.approve(owner, spender, restored);
}

/// Fixed ledger address of the exchange itself.
///
/// Callers approve this account as the spender for pair-creation pulls;
/// every later operation is approved against the individual pool's
/// address instead.
const EXCHANGE_ADDRESS: [u8; 32] = [0xee; 32];

/// Orchestration layer for all exchange operations.
///
/// Owns shared references to the [`PoolRegistry`] (pool state), the
/// [`TokenDirectory`] (collaborator resolution), and the [`EventBus`]
/// (event emission). Cloning is cheap and shares the same exchange.
#[derive(Debug, Clone)]
pub struct DexService {
    address: AccountId,
    registry: Arc<PoolRegistry>,
    tokens: Arc<TokenDirectory>,
    event_bus: EventBus,
    swap_fee_percent: u32,
}

impl DexService {
    /// Creates a new exchange service.
    #[must_use]
    pub fn new(
        config: &DexConfig,
        registry: Arc<PoolRegistry>,
        tokens: Arc<TokenDirectory>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            address: AccountId::from_bytes(EXCHANGE_ADDRESS),
            registry,
            tokens,
            event_bus,
            swap_fee_percent: config.swap_fee_percent,
        }
    }

    /// Returns the exchange's own ledger address (the spender to
    /// approve for pair creation).
    #[must_use]
    pub const fn address(&self) -> AccountId {
        self.address
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub const fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the pool registry.
    #[must_use]
    pub const fn registry(&self) -> &Arc<PoolRegistry> {
        &self.registry
    }

    /// Returns a reference to the token directory.
    #[must_use]
    pub const fn tokens(&self) -> &Arc<TokenDirectory> {
        &self.tokens
    }

    // -- pair creation -------------------------------------------------------

    /// Deploys and seeds a new pool for an unordered token pair.
    ///
    /// Pulls `amount_one` / `amount_two` from `caller` into the new
    /// pool (the caller must have approved the exchange address on both
    /// tokens), mints the creation deposit of liquidity shares to the
    /// caller, records the pair in the directory, and publishes
    /// [`PoolEvent::PoolCreated`]. Deployment and funding are one
    /// atomic unit: a failed token pull aborts the whole call and no
    /// pool is recorded.
    ///
    /// Returns the new pool's address.
    ///
    /// # Errors
    ///
    /// - [`DexError::MustSendSomeTokens`] if either amount is zero.
    /// - [`DexError::IdenticalTokens`] / [`DexError::ZeroAddress`] for
    ///   an invalid pair.
    /// - [`DexError::DuplicatePair`] if the pair already has a pool.
    /// - [`DexError::TokenNotFound`] if either token is unregistered.
    /// - Any collaborator failure from the seed pulls.
    pub async fn create_new_pair(
        &self,
        caller: AccountId,
        token_one: AccountId,
        token_two: AccountId,
        amount_one: Amount,
        amount_two: Amount,
    ) -> Result<AccountId, DexError> {
        if amount_one.is_zero() || amount_two.is_zero() {
            return Err(DexError::MustSendSomeTokens);
        }
        let pair = PairKey::new(token_one, token_two)?;
        if let Some(existing) = self.registry.pool_of_pair(pair).await {
            return Err(DexError::DuplicatePair(existing));
        }

        let token_one_handle = self.tokens.get(token_one).await?;
        let token_two_handle = self.tokens.get(token_two).await?;

        let mut pool = LiquidityPool::new(
            PoolId::new(),
            caller,
            token_one,
            token_two,
            self.swap_fee_percent,
        );
        let pool_address = pool.address();

        // Seed pulls; the exchange account is the approved spender.
        {
            let mut token = token_one_handle.write().await;
            token.transfer_from(self.address, caller, pool_address, amount_one)?;
        }
        let second_leg = {
            let mut token = token_two_handle.write().await;
            token.transfer_from(self.address, caller, pool_address, amount_two)
        };
        if let Err(error) = second_leg {
            // Undo the first leg before surfacing the failure.
            refund_pull(&token_one_handle, caller, self.address, pool_address, amount_one).await;
            return Err(error);
        }

        let seeded = pool.deposit(caller, amount_one, amount_two);
        let insert = match seeded {
            Ok(_) => self.registry.insert(pair, pool).await,
            Err(error) => Err(error),
        };
        if let Err(error) = insert {
            // Deposit overflow or a raced duplicate: return the seed.
            refund_pull(&token_one_handle, caller, self.address, pool_address, amount_one).await;
            refund_pull(&token_two_handle, caller, self.address, pool_address, amount_two).await;
            return Err(error);
        }

        self.event_bus.publish(PoolEvent::PoolCreated {
            pool_address,
            token_one,
            token_two,
            init_amount_one: amount_one,
            init_amount_two: amount_two,
            pool_creator: caller,
            timestamp: Utc::now(),
        });
        tracing::info!(pool = %pool_address, creator = %caller, "pool created");
        Ok(pool_address)
    }

    // -- liquidity -----------------------------------------------------------

    /// Adds liquidity to a pool, ratio-adjusting the requested amounts.
    ///
    /// The caller must have approved the pool's address on both tokens
    /// for at least the adjusted amounts. Against a drained pool the
    /// amounts are taken as-is and establish a fresh ratio. Returns the
    /// liquidity shares minted (possibly zero for a dust deposit) and
    /// publishes [`PoolEvent::LiquidityAdded`] carrying the amounts
    /// actually pulled.
    ///
    /// # Errors
    ///
    /// - [`DexError::MustSendSomeTokens`] if either amount is zero.
    /// - [`DexError::PoolNotFound`] for an unknown pool address.
    /// - Any collaborator failure from the two pulls.
    pub async fn add_liquidity(
        &self,
        caller: AccountId,
        pool_address: AccountId,
        amount_one: Amount,
        amount_two: Amount,
    ) -> Result<Amount, DexError> {
        if amount_one.is_zero() || amount_two.is_zero() {
            return Err(DexError::MustSendSomeTokens);
        }
        let handle = self.registry.get(pool_address).await?;
        let mut pool = handle.write().await;

        let token_one_handle = self.tokens.get(pool.token_one()).await?;
        let token_two_handle = self.tokens.get(pool.token_two()).await?;

        let (adj_one, adj_two) = if pool.is_empty() {
            (amount_one, amount_two)
        } else {
            pool.liquidity_proportion(amount_one, amount_two)?
        };

        {
            let mut token = token_one_handle.write().await;
            token.transfer_from(pool_address, caller, pool_address, adj_one)?;
        }
        let second_leg = {
            let mut token = token_two_handle.write().await;
            token.transfer_from(pool_address, caller, pool_address, adj_two)
        };
        if let Err(error) = second_leg {
            refund_pull(&token_one_handle, caller, pool_address, pool_address, adj_one).await;
            return Err(error);
        }

        let checkpoint = pool.clone();
        let minted = match pool.deposit(caller, adj_one, adj_two) {
            Ok(minted) => minted,
            Err(error) => {
                *pool = checkpoint;
                refund_pull(&token_one_handle, caller, pool_address, pool_address, adj_one).await;
                refund_pull(&token_two_handle, caller, pool_address, pool_address, adj_two).await;
                return Err(error);
            }
        };
        drop(pool);

        self.event_bus.publish(PoolEvent::LiquidityAdded {
            pool_address,
            provider: caller,
            amount_one: adj_one,
            amount_two: adj_two,
            minted,
            timestamp: Utc::now(),
        });
        tracing::debug!(
            pool = %pool_address,
            provider = %caller,
            %minted,
            "liquidity added"
        );
        Ok(minted)
    }

    /// Removes the caller's entire liquidity position from a pool.
    ///
    /// There is no partial withdrawal: the caller's whole share balance
    /// is burned and the proportional slice of both reserves is sent
    /// back. Publishes [`PoolEvent::LiquidityRemoved`].
    ///
    /// # Errors
    ///
    /// - [`DexError::PoolNotFound`] for an unknown pool address.
    /// - [`DexError::NoLiquidityAvailable`] if the caller holds no
    ///   shares.
    /// - Any collaborator failure from the payout legs.
    pub async fn remove_liquidity(
        &self,
        caller: AccountId,
        pool_address: AccountId,
    ) -> Result<(Amount, Amount), DexError> {
        let handle = self.registry.get(pool_address).await?;
        let mut pool = handle.write().await;

        let token_one_handle = self.tokens.get(pool.token_one()).await?;
        let token_two_handle = self.tokens.get(pool.token_two()).await?;

        // Internal state first: burn the shares and release reserves.
        let checkpoint = pool.clone();
        let (out_one, out_two) = pool.withdraw(caller)?;

        let first_leg = {
            let mut token = token_one_handle.write().await;
            token.transfer(pool_address, caller, out_one)
        };
        if let Err(error) = first_leg {
            *pool = checkpoint;
            return Err(error);
        }
        let second_leg = {
            let mut token = token_two_handle.write().await;
            token.transfer(pool_address, caller, out_two)
        };
        if let Err(error) = second_leg {
            // Pull the first payout back, then restore the pool.
            {
                let mut token = token_one_handle.write().await;
                let _ = token.transfer(caller, pool_address, out_one);
            }
            *pool = checkpoint;
            return Err(error);
        }
        drop(pool);

        self.event_bus.publish(PoolEvent::LiquidityRemoved {
            pool_address,
            provider: caller,
            amount_one: out_one,
            amount_two: out_two,
            timestamp: Utc::now(),
        });
        tracing::debug!(
            pool = %pool_address,
            provider = %caller,
            %out_one,
            %out_two,
            "liquidity removed"
        );
        Ok((out_one, out_two))
    }

    // -- swaps ---------------------------------------------------------------

    /// Swaps an exact token-one input for the quoted token-two output.
    ///
    /// The caller must have approved the pool's address on token one.
    /// Publishes [`PoolEvent::SwapExecuted`] and returns the output
    /// amount.
    ///
    /// # Errors
    ///
    /// - [`DexError::MustSendSomeTokens`] if `amount_in` is zero.
    /// - [`DexError::PoolNotFound`] for an unknown pool address.
    /// - [`DexError::InsufficientLiquidity`] if the swap would drain
    ///   the opposite reserve.
    /// - Any collaborator failure from the settlement legs.
    pub async fn swap_token_one_for_two(
        &self,
        caller: AccountId,
        pool_address: AccountId,
        amount_in: Amount,
    ) -> Result<Amount, DexError> {
        self.execute_swap(caller, pool_address, amount_in, true).await
    }

    /// Swaps an exact token-two input for the quoted token-one output.
    /// Mirror of [`DexService::swap_token_one_for_two`].
    ///
    /// # Errors
    ///
    /// Same as [`DexService::swap_token_one_for_two`].
    pub async fn swap_token_two_for_one(
        &self,
        caller: AccountId,
        pool_address: AccountId,
        amount_in: Amount,
    ) -> Result<Amount, DexError> {
        self.execute_swap(caller, pool_address, amount_in, false).await
    }

    async fn execute_swap(
        &self,
        caller: AccountId,
        pool_address: AccountId,
        amount_in: Amount,
        one_for_two: bool,
    ) -> Result<Amount, DexError> {
        if amount_in.is_zero() {
            return Err(DexError::MustSendSomeTokens);
        }
        let handle = self.registry.get(pool_address).await?;
        let mut pool = handle.write().await;

        let (token_in_address, token_out_address) = if one_for_two {
            (pool.token_one(), pool.token_two())
        } else {
            (pool.token_two(), pool.token_one())
        };
        let token_in_handle = self.tokens.get(token_in_address).await?;
        let token_out_handle = self.tokens.get(token_out_address).await?;

        // Quote before moving any funds so a failed swap has nothing
        // to undo.
        if one_for_two {
            pool.token_two_quantity(amount_in)?;
        } else {
            pool.token_one_quantity(amount_in)?;
        }

        {
            let mut token = token_in_handle.write().await;
            token.transfer_from(pool_address, caller, pool_address, amount_in)?;
        }

        // Reserves are committed before the outbound transfer.
        let checkpoint = pool.clone();
        let applied = if one_for_two {
            pool.swap_one_for_two(amount_in)
        } else {
            pool.swap_two_for_one(amount_in)
        };
        let amount_out = match applied {
            Ok(amount_out) => amount_out,
            Err(error) => {
                refund_pull(&token_in_handle, caller, pool_address, pool_address, amount_in).await;
                return Err(error);
            }
        };

        let outbound = {
            let mut token = token_out_handle.write().await;
            token.transfer(pool_address, caller, amount_out)
        };
        if let Err(error) = outbound {
            *pool = checkpoint;
            refund_pull(&token_in_handle, caller, pool_address, pool_address, amount_in).await;
            return Err(error);
        }
        drop(pool);

        self.event_bus.publish(PoolEvent::SwapExecuted {
            pool_address,
            trader: caller,
            token_in: token_in_address,
            token_out: token_out_address,
            amount_in,
            amount_out,
            timestamp: Utc::now(),
        });
        tracing::debug!(
            pool = %pool_address,
            trader = %caller,
            %amount_in,
            %amount_out,
            "swap executed"
        );
        Ok(amount_out)
    }

    // -- quotes and queries --------------------------------------------------

    /// Quotes the token-two output for a token-one input. No state
    /// change.
    ///
    /// # Errors
    ///
    /// - [`DexError::PoolNotFound`] for an unknown pool address.
    /// - Any pricing error from the pool.
    pub async fn token_two_quantity(
        &self,
        pool_address: AccountId,
        amount_in: Amount,
    ) -> Result<Amount, DexError> {
        let handle = self.registry.get(pool_address).await?;
        let pool = handle.read().await;
        pool.token_two_quantity(amount_in)
    }

    /// Quotes the token-one output for a token-two input. No state
    /// change.
    ///
    /// # Errors
    ///
    /// Same as [`DexService::token_two_quantity`], mirrored.
    pub async fn token_one_quantity(
        &self,
        pool_address: AccountId,
        amount_in: Amount,
    ) -> Result<Amount, DexError> {
        let handle = self.registry.get(pool_address).await?;
        let pool = handle.read().await;
        pool.token_one_quantity(amount_in)
    }

    /// Ratio-adjusts a prospective deposit against current reserves.
    /// No state change.
    ///
    /// # Errors
    ///
    /// - [`DexError::PoolNotFound`] for an unknown pool address.
    /// - [`DexError::EmptyPool`] if the pool has no reserves.
    pub async fn liquidity_proportion(
        &self,
        pool_address: AccountId,
        amount_one: Amount,
        amount_two: Amount,
    ) -> Result<(Amount, Amount), DexError> {
        let handle = self.registry.get(pool_address).await?;
        let pool = handle.read().await;
        pool.liquidity_proportion(amount_one, amount_two)
    }

    /// Moves liquidity shares from the caller to another holder, so LP
    /// positions are themselves transferable.
    ///
    /// # Errors
    ///
    /// - [`DexError::PoolNotFound`] for an unknown pool address.
    /// - [`DexError::InsufficientBalance`] if the caller holds fewer
    ///   shares than `value`.
    pub async fn transfer_shares(
        &self,
        caller: AccountId,
        pool_address: AccountId,
        to: AccountId,
        value: Amount,
    ) -> Result<(), DexError> {
        let handle = self.registry.get(pool_address).await?;
        let mut pool = handle.write().await;
        pool.transfer_shares(caller, to, value)
    }

    /// Returns `owner`'s liquidity-share balance in a pool.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::PoolNotFound`] for an unknown pool address.
    pub async fn share_balance_of(
        &self,
        pool_address: AccountId,
        owner: AccountId,
    ) -> Result<Amount, DexError> {
        let handle = self.registry.get(pool_address).await?;
        let pool = handle.read().await;
        Ok(pool.share_balance_of(owner))
    }

    /// Returns a read-only snapshot of a pool.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::PoolNotFound`] for an unknown pool address.
    pub async fn pool_summary(&self, pool_address: AccountId) -> Result<PoolSummary, DexError> {
        let handle = self.registry.get(pool_address).await?;
        let pool = handle.read().await;
        Ok(PoolSummary::from(&*pool))
    }

    /// Returns summaries of all pools.
    pub async fn list_pools(&self) -> Vec<PoolSummary> {
        self.registry.list().await
    }

    /// Looks up the pool address for an unordered token pair.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::IdenticalTokens`] / [`DexError::ZeroAddress`]
    /// for an invalid pair.
    pub async fn pool_of_pair(
        &self,
        token_one: AccountId,
        token_two: AccountId,
    ) -> Result<Option<AccountId>, DexError> {
        let pair = PairKey::new(token_one, token_two)?;
        Ok(self.registry.pool_of_pair(pair).await)
    }
}
