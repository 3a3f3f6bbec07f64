//! Capability interface for external token collaborators.
//!
//! The exchange never depends on a concrete token implementation — pools
//! and the registry move funds exclusively through this trait. Any
//! balance ledger with standard transfer/approval semantics satisfies
//! it; [`StandardToken`](super::StandardToken) is the in-memory
//! reference implementation used in tests and demos.
//!
//! There is no ambient caller in a plain Rust call, so every mutating
//! method takes the acting account as its first `caller` parameter.

use core::fmt;

use crate::domain::{AccountId, Amount};
use crate::error::DexError;

/// A fungible balance ledger consumed by the exchange.
///
/// # Failure policy
///
/// Any error returned from these methods aborts the enclosing exchange
/// operation; the exchange never retries a collaborator call.
pub trait FungibleToken: fmt::Debug + Send + Sync {
    /// Returns the token's ledger address.
    fn address(&self) -> AccountId;

    /// Returns the total number of units in circulation.
    fn total_supply(&self) -> Amount;

    /// Returns the balance held by `owner`.
    fn balance_of(&self, owner: AccountId) -> Amount;

    /// Returns the amount `spender` may still pull from `owner`.
    fn allowance(&self, owner: AccountId, spender: AccountId) -> Amount;

    /// Creates `value` new units and credits them to `caller`.
    ///
    /// Present as a test/mock convenience; the exchange itself never
    /// mints collaborator tokens.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the supply would exceed `u128`.
    fn mint(&mut self, caller: AccountId, value: Amount) -> Result<(), DexError>;

    /// Moves `value` units from `caller` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InsufficientBalance`] if `caller` holds less
    /// than `value`.
    fn transfer(
        &mut self,
        caller: AccountId,
        to: AccountId,
        value: Amount,
    ) -> Result<(), DexError>;

    /// Sets `spender`'s allowance over `caller`'s funds to `value`.
    ///
    /// # Errors
    ///
    /// Implementations are infallible by default but may reject, e.g.
    /// for a zero `spender` address.
    fn approve(
        &mut self,
        caller: AccountId,
        spender: AccountId,
        value: Amount,
    ) -> Result<(), DexError>;

    /// Moves `value` units from `from` to `to`, spending `caller`'s
    /// allowance over `from`'s funds.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientAllowance`] if `caller`'s allowance
    ///   over `from` is less than `value`.
    /// - [`DexError::InsufficientBalance`] if `from` holds less than
    ///   `value`.
    fn transfer_from(
        &mut self,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
        value: Amount,
    ) -> Result<(), DexError>;
}
