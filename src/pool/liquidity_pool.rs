//! Constant-product liquidity pool accounting.
//!
//! The swap invariant is `reserve_one × reserve_two = k`. Output is
//! priced by the constant-product formula and the fee is deducted from
//! the **output** side:
//!
//! 1. `raw_out = reserve_out − reserve_in × reserve_out / (reserve_in + amount_in)`
//! 2. `fee = raw_out × fee_percent / 100`
//! 3. `amount_out = raw_out − fee`
//! 4. `reserve_in += amount_in`, `reserve_out −= amount_out`
//!
//! All division floors. After every swap `k` is non-decreasing, strictly
//! increasing whenever the fee is non-zero, because the fee portion of
//! `raw_out` stays in the pool.
//!
//! The pool is a pure synchronous state machine over
//! `(reserve_one, reserve_two, share supply)`; pulling and pushing the
//! actual token balances is the service layer's job. Its two states are
//! "empty" (both reserves zero — freshly constructed, or drained by a
//! full withdrawal) and "funded"; a deposit against the empty state
//! establishes a new ratio from scratch.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{AccountId, Amount, PoolId};
use crate::error::DexError;
use crate::token::LiquidityShare;

/// A single trading venue for one token pair.
///
/// Holds the two reserve counters, the owned [`LiquidityShare`] token,
/// and operational metadata. Token one and token two keep the creator's
/// argument order — operations are side-sensitive — while uniqueness per
/// unordered pair is enforced by the registry directory.
///
/// `Clone` exists so the service layer can checkpoint the pool before a
/// settlement leg and restore it if an outbound token call fails.
#[derive(Debug, Clone)]
pub struct LiquidityPool {
    pool_id: PoolId,
    address: AccountId,
    creator: AccountId,
    token_one: AccountId,
    token_two: AccountId,
    shares: LiquidityShare,
    reserve_one: Amount,
    reserve_two: Amount,
    swap_fee_percent: u32,
    created_at: DateTime<Utc>,
    last_modified_at: DateTime<Utc>,
    swap_count: u64,
}

impl LiquidityPool {
    /// Creates an empty pool for the given pair.
    ///
    /// The pool and share-token addresses are derived from `pool_id`.
    /// Reserves start at zero; the registry seeds them through
    /// [`LiquidityPool::deposit`] in the same atomic creation call.
    pub(crate) fn new(
        pool_id: PoolId,
        creator: AccountId,
        token_one: AccountId,
        token_two: AccountId,
        swap_fee_percent: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            pool_id,
            address: pool_id.pool_address(),
            creator,
            token_one,
            token_two,
            shares: LiquidityShare::new(pool_id.share_address()),
            reserve_one: Amount::ZERO,
            reserve_two: Amount::ZERO,
            swap_fee_percent,
            created_at: now,
            last_modified_at: now,
            swap_count: 0,
        }
    }

    // -- queries ------------------------------------------------------------

    /// Returns the pool's identifier.
    #[must_use]
    pub const fn pool_id(&self) -> PoolId {
        self.pool_id
    }

    /// Returns the pool's own ledger address.
    #[must_use]
    pub const fn address(&self) -> AccountId {
        self.address
    }

    /// Returns the account that created and seeded the pool.
    #[must_use]
    pub const fn creator(&self) -> AccountId {
        self.creator
    }

    /// Returns the address of token one (creator's argument order).
    #[must_use]
    pub const fn token_one(&self) -> AccountId {
        self.token_one
    }

    /// Returns the address of token two.
    #[must_use]
    pub const fn token_two(&self) -> AccountId {
        self.token_two
    }

    /// Returns the address of the pool's liquidity-share token.
    #[must_use]
    pub fn share_address(&self) -> AccountId {
        self.shares.address()
    }

    /// Returns the current reserves as `(reserve_one, reserve_two)`.
    #[must_use]
    pub const fn reserves(&self) -> (Amount, Amount) {
        (self.reserve_one, self.reserve_two)
    }

    /// Returns the swap fee percentage.
    #[must_use]
    pub const fn swap_fee_percent(&self) -> u32 {
        self.swap_fee_percent
    }

    /// Returns the number of swaps executed on this pool.
    #[must_use]
    pub const fn swap_count(&self) -> u64 {
        self.swap_count
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the timestamp of the last state mutation.
    #[must_use]
    pub const fn last_modified_at(&self) -> DateTime<Utc> {
        self.last_modified_at
    }

    /// Returns `true` if both reserves are zero.
    ///
    /// The funded-pool invariant (`reserve_one > 0 ⇔ reserve_two > 0`)
    /// means a pool is either fully empty or fully funded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.reserve_one.is_zero() && self.reserve_two.is_zero()
    }

    /// Returns the total liquidity-share supply.
    #[must_use]
    pub fn share_total_supply(&self) -> Amount {
        self.shares.total_supply()
    }

    /// Returns `owner`'s liquidity-share balance.
    #[must_use]
    pub fn share_balance_of(&self, owner: AccountId) -> Amount {
        self.shares.balance_of(owner)
    }

    // -- pure pricing -------------------------------------------------------

    /// Adjusts a requested deposit to the current reserve ratio.
    ///
    /// Returns the largest pair of amounts not exceeding the requested
    /// ones that preserves `reserve_one : reserve_two` exactly (under
    /// floor division): `optimal_two = amount_one × reserve_two /
    /// reserve_one`; if that fits within `amount_two` the token-one
    /// request is kept whole, otherwise the token-two request is kept
    /// and token one is scaled down instead.
    ///
    /// Idempotent: applying it to its own output returns that output.
    ///
    /// # Errors
    ///
    /// - [`DexError::EmptyPool`] if the pool has no reserves (there is
    ///   no ratio to preserve).
    /// - [`DexError::Overflow`] if an intermediate product overflows.
    pub fn liquidity_proportion(
        &self,
        amount_one: Amount,
        amount_two: Amount,
    ) -> Result<(Amount, Amount), DexError> {
        if self.is_empty() {
            return Err(DexError::EmptyPool);
        }

        let optimal_two = amount_one
            .checked_mul(self.reserve_two)
            .ok_or(DexError::Overflow("proportion numerator"))?
            .checked_div(self.reserve_one)
            .ok_or(DexError::EmptyPool)?;

        if optimal_two <= amount_two {
            return Ok((amount_one, optimal_two));
        }

        let optimal_one = amount_two
            .checked_mul(self.reserve_one)
            .ok_or(DexError::Overflow("proportion numerator"))?
            .checked_div(self.reserve_two)
            .ok_or(DexError::EmptyPool)?;

        Ok((optimal_one, amount_two))
    }

    /// Quotes the token-two output for a token-one input. No state change.
    ///
    /// # Errors
    ///
    /// - [`DexError::EmptyPool`] if the pool has no reserves.
    /// - [`DexError::InsufficientLiquidity`] if the output would drain
    ///   the entire token-two reserve.
    /// - [`DexError::Overflow`] if an intermediate product overflows.
    pub fn token_two_quantity(&self, amount_in: Amount) -> Result<Amount, DexError> {
        self.output_quantity(self.reserve_one, self.reserve_two, amount_in)
    }

    /// Quotes the token-one output for a token-two input. No state change.
    ///
    /// # Errors
    ///
    /// Same as [`LiquidityPool::token_two_quantity`], with the reserves
    /// swapped.
    pub fn token_one_quantity(&self, amount_in: Amount) -> Result<Amount, DexError> {
        self.output_quantity(self.reserve_two, self.reserve_one, amount_in)
    }

    /// Constant-product output with the fee taken from the output side.
    fn output_quantity(
        &self,
        reserve_in: Amount,
        reserve_out: Amount,
        amount_in: Amount,
    ) -> Result<Amount, DexError> {
        if self.is_empty() {
            return Err(DexError::EmptyPool);
        }

        let product = reserve_in
            .checked_mul(reserve_out)
            .ok_or(DexError::Overflow("reserve product"))?;
        let denominator = reserve_in
            .checked_add(amount_in)
            .ok_or(DexError::Overflow("input reserve plus amount"))?;
        let kept = product
            .checked_div(denominator)
            .ok_or(DexError::Overflow("swap denominator is zero"))?;

        let raw_out = reserve_out
            .checked_sub(kept)
            .ok_or(DexError::Overflow("raw output underflow"))?;
        let fee = raw_out
            .checked_mul(Amount::new(u128::from(self.swap_fee_percent)))
            .ok_or(DexError::Overflow("fee numerator"))?
            .checked_div(Amount::new(100))
            .ok_or(DexError::Overflow("fee denominator is zero"))?;
        let amount_out = raw_out
            .checked_sub(fee)
            .ok_or(DexError::Overflow("fee exceeds raw output"))?;

        // Paying out the whole opposite reserve would leave the pool
        // half-empty and break the funded-pool invariant.
        if amount_out >= reserve_out {
            return Err(DexError::InsufficientLiquidity);
        }

        Ok(amount_out)
    }

    // -- state transitions (service layer only) -----------------------------

    /// Applies a liquidity deposit and mints shares to `provider`.
    ///
    /// Amounts must already be ratio-adjusted via
    /// [`LiquidityPool::liquidity_proportion`] when the pool is funded;
    /// against an empty pool they are taken as-is and establish the new
    /// ratio. Shares minted:
    ///
    /// - empty pool: `amount_one` (the creation-deposit rule);
    /// - funded pool: `amount_one × supply / (reserve_one + amount_one)`,
    ///   floor division over the **post-deposit** token-one reserve. A
    ///   zero mint is legal when truncation swallows a dust deposit.
    ///
    /// Returns the minted share amount.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if a reserve, the mint numerator,
    /// or the share supply would exceed `u128`.
    pub(crate) fn deposit(
        &mut self,
        provider: AccountId,
        amount_one: Amount,
        amount_two: Amount,
    ) -> Result<Amount, DexError> {
        let minted = if self.is_empty() {
            amount_one
        } else {
            let denominator = self
                .reserve_one
                .checked_add(amount_one)
                .ok_or(DexError::Overflow("deposit reserve overflow"))?;
            amount_one
                .checked_mul(self.shares.total_supply())
                .ok_or(DexError::Overflow("mint numerator"))?
                .checked_div(denominator)
                .ok_or(DexError::Overflow("mint denominator is zero"))?
        };

        self.reserve_one = self
            .reserve_one
            .checked_add(amount_one)
            .ok_or(DexError::Overflow("reserve one overflow on deposit"))?;
        self.reserve_two = self
            .reserve_two
            .checked_add(amount_two)
            .ok_or(DexError::Overflow("reserve two overflow on deposit"))?;
        self.shares.mint(provider, minted)?;
        self.touch();
        Ok(minted)
    }

    /// Burns `provider`'s entire share balance and releases reserves.
    ///
    /// There is no partial withdrawal: the whole balance is redeemed at
    /// `out_i = balance × reserve_i / supply` (floor). Returns the
    /// released `(out_one, out_two)`; the service layer settles them.
    ///
    /// # Errors
    ///
    /// - [`DexError::NoLiquidityAvailable`] if `provider` holds no
    ///   shares.
    /// - [`DexError::Overflow`] if an intermediate product overflows.
    pub(crate) fn withdraw(&mut self, provider: AccountId) -> Result<(Amount, Amount), DexError> {
        let share_balance = self.shares.balance_of(provider);
        if share_balance.is_zero() {
            return Err(DexError::NoLiquidityAvailable);
        }
        let supply = self.shares.total_supply();

        let out_one = share_balance
            .checked_mul(self.reserve_one)
            .ok_or(DexError::Overflow("withdrawal numerator"))?
            .checked_div(supply)
            .ok_or(DexError::Overflow("withdrawal supply is zero"))?;
        let out_two = share_balance
            .checked_mul(self.reserve_two)
            .ok_or(DexError::Overflow("withdrawal numerator"))?
            .checked_div(supply)
            .ok_or(DexError::Overflow("withdrawal supply is zero"))?;

        self.shares.burn(provider, share_balance)?;
        self.reserve_one = self
            .reserve_one
            .checked_sub(out_one)
            .ok_or(DexError::Overflow("reserve one underflow on withdrawal"))?;
        self.reserve_two = self
            .reserve_two
            .checked_sub(out_two)
            .ok_or(DexError::Overflow("reserve two underflow on withdrawal"))?;
        self.touch();
        Ok((out_one, out_two))
    }

    /// Applies a token-one → token-two swap to the reserves.
    ///
    /// Returns the token-two output owed to the trader.
    ///
    /// # Errors
    ///
    /// - [`DexError::MustSendSomeTokens`] if `amount_in` is zero.
    /// - Any error from [`LiquidityPool::token_two_quantity`].
    pub(crate) fn swap_one_for_two(&mut self, amount_in: Amount) -> Result<Amount, DexError> {
        if amount_in.is_zero() {
            return Err(DexError::MustSendSomeTokens);
        }
        let amount_out = self.token_two_quantity(amount_in)?;

        self.reserve_one = self
            .reserve_one
            .checked_add(amount_in)
            .ok_or(DexError::Overflow("reserve one overflow on swap"))?;
        self.reserve_two = self
            .reserve_two
            .checked_sub(amount_out)
            .ok_or(DexError::Overflow("reserve two underflow on swap"))?;
        self.swap_count = self.swap_count.saturating_add(1);
        self.touch();
        Ok(amount_out)
    }

    /// Applies a token-two → token-one swap to the reserves. Mirror of
    /// [`LiquidityPool::swap_one_for_two`].
    ///
    /// # Errors
    ///
    /// - [`DexError::MustSendSomeTokens`] if `amount_in` is zero.
    /// - Any error from [`LiquidityPool::token_one_quantity`].
    pub(crate) fn swap_two_for_one(&mut self, amount_in: Amount) -> Result<Amount, DexError> {
        if amount_in.is_zero() {
            return Err(DexError::MustSendSomeTokens);
        }
        let amount_out = self.token_one_quantity(amount_in)?;

        self.reserve_two = self
            .reserve_two
            .checked_add(amount_in)
            .ok_or(DexError::Overflow("reserve two overflow on swap"))?;
        self.reserve_one = self
            .reserve_one
            .checked_sub(amount_out)
            .ok_or(DexError::Overflow("reserve one underflow on swap"))?;
        self.swap_count = self.swap_count.saturating_add(1);
        self.touch();
        Ok(amount_out)
    }

    /// Moves liquidity shares between holders.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InsufficientBalance`] if `from` holds fewer
    /// than `value` shares.
    pub(crate) fn transfer_shares(
        &mut self,
        from: AccountId,
        to: AccountId,
        value: Amount,
    ) -> Result<(), DexError> {
        self.shares.transfer(from, to, value)?;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.last_modified_at = Utc::now();
    }
}

/// Lightweight read-only snapshot of a pool for listings.
#[derive(Debug, Clone, Serialize)]
pub struct PoolSummary {
    /// Pool ledger address.
    pub pool_address: AccountId,
    /// Account that created and seeded the pool.
    pub pool_creator: AccountId,
    /// Token one of the pair.
    pub token_one: AccountId,
    /// Token two of the pair.
    pub token_two: AccountId,
    /// Address of the pool's liquidity-share token.
    pub share_address: AccountId,
    /// Current token-one reserve.
    pub reserve_one: Amount,
    /// Current token-two reserve.
    pub reserve_two: Amount,
    /// Outstanding liquidity-share supply.
    pub share_supply: Amount,
    /// Swap fee percentage.
    pub swap_fee_percent: u32,
    /// Number of swaps executed.
    pub swap_count: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&LiquidityPool> for PoolSummary {
    fn from(pool: &LiquidityPool) -> Self {
        Self {
            pool_address: pool.address(),
            pool_creator: pool.creator(),
            token_one: pool.token_one(),
            token_two: pool.token_two(),
            share_address: pool.share_address(),
            reserve_one: pool.reserves().0,
            reserve_two: pool.reserves().1,
            share_supply: pool.share_total_supply(),
            swap_fee_percent: pool.swap_fee_percent(),
            swap_count: pool.swap_count(),
            created_at: pool.created_at(),
        }
    }
}
