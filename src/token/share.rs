//! Liquidity-share token: proportional claim on one pool's reserves.

use super::BalanceLedger;
use crate::domain::{AccountId, Amount};
use crate::error::DexError;

/// Fungible accounting token representing proportional ownership of one
/// pool's reserves.
///
/// Each [`LiquidityPool`](crate::pool::LiquidityPool) owns exactly one
/// `LiquidityShare`; the pool mints on liquidity addition (including its
/// own creation deposit) and burns on removal. Mint and burn are
/// `pub(crate)` — ownership by the pool is the authority boundary, the
/// Rust rendition of "mint/burn restricted to the owning pool". Holders
/// see an ordinary fungible surface (balance, supply, transfer) through
/// the pool, so LP positions are themselves transferable.
#[derive(Debug, Clone)]
pub struct LiquidityShare {
    ledger: BalanceLedger,
}

impl LiquidityShare {
    /// Creates an empty share token at `address`.
    #[must_use]
    pub(crate) fn new(address: AccountId) -> Self {
        Self {
            ledger: BalanceLedger::new(address),
        }
    }

    /// Returns the share token's ledger address.
    #[must_use]
    pub fn address(&self) -> AccountId {
        self.ledger.token()
    }

    /// Returns the total number of shares in circulation.
    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.ledger.total_supply()
    }

    /// Returns the share balance held by `owner`.
    #[must_use]
    pub fn balance_of(&self, owner: AccountId) -> Amount {
        self.ledger.balance_of(owner)
    }

    /// Moves `value` shares from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InsufficientBalance`] if `from` holds fewer
    /// than `value` shares.
    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        value: Amount,
    ) -> Result<(), DexError> {
        self.ledger.transfer(from, to, value)
    }

    /// Mints `value` shares to `to`. Pool-only.
    pub(crate) fn mint(&mut self, to: AccountId, value: Amount) -> Result<(), DexError> {
        self.ledger.mint(to, value)
    }

    /// Burns `value` shares held by `from`. Pool-only.
    pub(crate) fn burn(&mut self, from: AccountId, value: Amount) -> Result<(), DexError> {
        self.ledger.burn(from, value)
    }
}
