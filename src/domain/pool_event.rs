//! Domain events reflecting exchange state mutations.
//!
//! Every committed state change publishes a [`PoolEvent`] through the
//! [`super::EventBus`] for external observers and indexers. Events are
//! emitted only after the whole operation has settled — an aborted call
//! publishes nothing.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{AccountId, Amount};

/// Domain event emitted after every committed state mutation.
///
/// [`Amount`] fields serialize as decimal strings and [`AccountId`]
/// fields as hex strings, so `u128` precision survives JSON transport.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum PoolEvent {
    /// Emitted when the registry deploys and seeds a new pool.
    PoolCreated {
        /// Address of the new pool.
        pool_address: AccountId,
        /// First token of the pair, in the creator's argument order.
        token_one: AccountId,
        /// Second token of the pair.
        token_two: AccountId,
        /// Seed deposit of token one.
        init_amount_one: Amount,
        /// Seed deposit of token two.
        init_amount_two: Amount,
        /// Account that created and seeded the pool.
        pool_creator: AccountId,
        /// Creation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a liquidity deposit.
    LiquidityAdded {
        /// Pool that received the deposit.
        pool_address: AccountId,
        /// Depositing account.
        provider: AccountId,
        /// Token-one amount actually pulled (after ratio adjustment).
        amount_one: Amount,
        /// Token-two amount actually pulled (after ratio adjustment).
        amount_two: Amount,
        /// Liquidity shares minted to the provider.
        minted: Amount,
        /// Deposit timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a full-balance liquidity withdrawal.
    LiquidityRemoved {
        /// Pool that paid out the withdrawal.
        pool_address: AccountId,
        /// Withdrawing account.
        provider: AccountId,
        /// Token-one amount returned.
        amount_one: Amount,
        /// Token-two amount returned.
        amount_two: Amount,
        /// Withdrawal timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a successful swap.
    SwapExecuted {
        /// Pool the swap executed on.
        pool_address: AccountId,
        /// Swapping account.
        trader: AccountId,
        /// Token sold into the pool.
        token_in: AccountId,
        /// Token bought from the pool.
        token_out: AccountId,
        /// Amount pulled from the trader.
        amount_in: Amount,
        /// Amount sent to the trader (after the output-side fee).
        amount_out: Amount,
        /// Execution timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl PoolEvent {
    /// Returns the pool address associated with this event.
    #[must_use]
    pub const fn pool_address(&self) -> AccountId {
        match self {
            Self::PoolCreated { pool_address, .. }
            | Self::LiquidityAdded { pool_address, .. }
            | Self::LiquidityRemoved { pool_address, .. }
            | Self::SwapExecuted { pool_address, .. } => *pool_address,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::PoolCreated { .. } => "pool_created",
            Self::LiquidityAdded { .. } => "liquidity_added",
            Self::LiquidityRemoved { .. } => "liquidity_removed",
            Self::SwapExecuted { .. } => "swap_executed",
        }
    }
}
