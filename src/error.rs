//! Unified error type for the exchange engine.
//!
//! [`DexError`] is the single error enum for every fallible operation in
//! the crate: registry, pool accounting, and token-ledger calls all
//! surface it. Any error aborts the enclosing operation with full
//! rollback; nothing is retried internally.

use crate::domain::AccountId;

/// Central error enum for all exchange operations.
///
/// # Propagation
///
/// Token-ledger failures ([`DexError::InsufficientBalance`],
/// [`DexError::InsufficientAllowance`]) are collaborator failures: they
/// are not caught or retried, they abort the whole enclosing operation.
/// Retry, if desired, is a caller-level concern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DexError {
    /// An amount parameter to add-liquidity or a swap was zero.
    #[error("must send some tokens")]
    MustSendSomeTokens,

    /// Remove-liquidity was invoked by a holder with no shares.
    #[error("no liquidity available for this account")]
    NoLiquidityAvailable,

    /// A pool already exists for this unordered token pair.
    #[error("pair already has a pool at {0}")]
    DuplicatePair(AccountId),

    /// Both sides of a pair resolve to the same token address.
    #[error("pair requires two distinct token addresses")]
    IdenticalTokens,

    /// The zero address is not a valid token or account.
    #[error("zero address is not a valid token")]
    ZeroAddress,

    /// No pool is registered at the given address.
    #[error("pool not found: {0}")]
    PoolNotFound(AccountId),

    /// No token is registered at the given address.
    #[error("token not found: {0}")]
    TokenNotFound(AccountId),

    /// A token is already registered at the given address.
    #[error("token already registered: {0}")]
    DuplicateToken(AccountId),

    /// A ledger account holds less than the requested transfer amount.
    #[error("insufficient balance of {token} for {owner}")]
    InsufficientBalance {
        /// Token whose ledger rejected the debit.
        token: AccountId,
        /// Account that lacked the funds.
        owner: AccountId,
    },

    /// The spender's approved allowance does not cover the transfer.
    #[error("insufficient allowance on {token}: {owner} -> {spender}")]
    InsufficientAllowance {
        /// Token whose ledger rejected the spend.
        token: AccountId,
        /// Account whose funds were to be pulled.
        owner: AccountId,
        /// Account attempting the pull.
        spender: AccountId,
    },

    /// A proportion or quote was requested against zero reserves.
    #[error("pool has no reserves")]
    EmptyPool,

    /// The swap would drain the entire opposite reserve.
    #[error("insufficient liquidity in pool")]
    InsufficientLiquidity,

    /// Checked arithmetic failed; the context names the computation.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),
}
