//! Balance and allowance bookkeeping shared by all in-crate tokens.

use std::collections::HashMap;

use crate::domain::{AccountId, Amount};
use crate::error::DexError;

/// Balances, allowances, and total supply for one token.
///
/// Both [`StandardToken`](super::StandardToken) and the pool-owned
/// [`LiquidityShare`](super::LiquidityShare) are thin wrappers over this
/// ledger; only the mint/burn authority differs between them.
///
/// Invariant: the sum of all balances equals `total_supply` after every
/// operation — transfers move value, only mint and burn change it.
#[derive(Debug, Clone)]
pub struct BalanceLedger {
    token: AccountId,
    balances: HashMap<AccountId, Amount>,
    allowances: HashMap<(AccountId, AccountId), Amount>,
    total_supply: Amount,
}

impl BalanceLedger {
    /// Creates an empty ledger for the token at `token`.
    #[must_use]
    pub fn new(token: AccountId) -> Self {
        Self {
            token,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            total_supply: Amount::ZERO,
        }
    }

    /// Returns the address of the token this ledger belongs to.
    #[must_use]
    pub const fn token(&self) -> AccountId {
        self.token
    }

    /// Returns the total number of units in circulation.
    #[must_use]
    pub const fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Returns the balance held by `owner`.
    #[must_use]
    pub fn balance_of(&self, owner: AccountId) -> Amount {
        self.balances.get(&owner).copied().unwrap_or(Amount::ZERO)
    }

    /// Returns the amount `spender` may still pull from `owner`.
    #[must_use]
    pub fn allowance(&self, owner: AccountId, spender: AccountId) -> Amount {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Creates `value` units out of thin air and credits `to`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the total supply would exceed
    /// `u128`.
    pub fn mint(&mut self, to: AccountId, value: Amount) -> Result<(), DexError> {
        self.total_supply = self
            .total_supply
            .checked_add(value)
            .ok_or(DexError::Overflow("mint exceeds max supply"))?;
        self.credit(to, value)
    }

    /// Destroys `value` units held by `from`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InsufficientBalance`] if `from` holds less
    /// than `value`.
    pub fn burn(&mut self, from: AccountId, value: Amount) -> Result<(), DexError> {
        self.debit(from, value)?;
        // Cannot underflow: the debited balance was part of the supply.
        self.total_supply = self
            .total_supply
            .checked_sub(value)
            .ok_or(DexError::Overflow("burn exceeds supply"))?;
        Ok(())
    }

    /// Moves `value` units from `from` to `to`.
    ///
    /// A zero-value transfer is a no-op that always succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InsufficientBalance`] if `from` holds less
    /// than `value`.
    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        value: Amount,
    ) -> Result<(), DexError> {
        self.debit(from, value)?;
        self.credit(to, value)
    }

    /// Sets `spender`'s allowance over `owner`'s funds to `value`.
    pub fn approve(&mut self, owner: AccountId, spender: AccountId, value: Amount) {
        self.allowances.insert((owner, spender), value);
    }

    /// Decrements `spender`'s allowance over `owner` by `value`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InsufficientAllowance`] if the current
    /// allowance is less than `value`.
    pub fn spend_allowance(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        value: Amount,
    ) -> Result<(), DexError> {
        let current = self.allowance(owner, spender);
        let remaining = current
            .checked_sub(value)
            .ok_or(DexError::InsufficientAllowance {
                token: self.token,
                owner,
                spender,
            })?;
        self.allowances.insert((owner, spender), remaining);
        Ok(())
    }

    fn credit(&mut self, to: AccountId, value: Amount) -> Result<(), DexError> {
        let entry = self.balances.entry(to).or_insert(Amount::ZERO);
        *entry = entry
            .checked_add(value)
            .ok_or(DexError::Overflow("ledger credit"))?;
        Ok(())
    }

    fn debit(&mut self, from: AccountId, value: Amount) -> Result<(), DexError> {
        let balance = self.balance_of(from);
        let remaining = balance
            .checked_sub(value)
            .ok_or(DexError::InsufficientBalance {
                token: self.token,
                owner: from,
            })?;
        self.balances.insert(from, remaining);
        Ok(())
    }
}
