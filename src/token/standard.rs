//! In-memory reference token implementation.

use super::{BalanceLedger, FungibleToken};
use crate::domain::{AccountId, Amount};
use crate::error::DexError;

/// A plain in-memory fungible token with an open mint.
///
/// The reference implementation of [`FungibleToken`], used as the
/// external collaborator in tests and demos: anyone can mint to
/// themselves, matching the faucet-style mock tokens the exchange is
/// exercised against. Production collaborators supply their own
/// [`FungibleToken`] implementation instead.
#[derive(Debug, Clone)]
pub struct StandardToken {
    ledger: BalanceLedger,
}

impl StandardToken {
    /// Creates a token with an empty ledger at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::ZeroAddress`] if `address` is the zero
    /// sentinel.
    pub fn new(address: AccountId) -> Result<Self, DexError> {
        if address.is_zero() {
            return Err(DexError::ZeroAddress);
        }
        Ok(Self {
            ledger: BalanceLedger::new(address),
        })
    }
}

impl FungibleToken for StandardToken {
    fn address(&self) -> AccountId {
        self.ledger.token()
    }

    fn total_supply(&self) -> Amount {
        self.ledger.total_supply()
    }

    fn balance_of(&self, owner: AccountId) -> Amount {
        self.ledger.balance_of(owner)
    }

    fn allowance(&self, owner: AccountId, spender: AccountId) -> Amount {
        self.ledger.allowance(owner, spender)
    }

    fn mint(&mut self, caller: AccountId, value: Amount) -> Result<(), DexError> {
        self.ledger.mint(caller, value)
    }

    fn transfer(
        &mut self,
        caller: AccountId,
        to: AccountId,
        value: Amount,
    ) -> Result<(), DexError> {
        self.ledger.transfer(caller, to, value)
    }

    fn approve(
        &mut self,
        caller: AccountId,
        spender: AccountId,
        value: Amount,
    ) -> Result<(), DexError> {
        self.ledger.approve(caller, spender, value);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
        value: Amount,
    ) -> Result<(), DexError> {
        // Validate the balance before spending allowance so a failed
        // pull leaves the ledger exactly as it was.
        if self.ledger.balance_of(from) < value {
            return Err(DexError::InsufficientBalance {
                token: self.ledger.token(),
                owner: from,
            });
        }
        self.ledger.spend_allowance(from, caller, value)?;
        self.ledger.transfer(from, to, value)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> AccountId {
        AccountId::from_bytes([byte; 32])
    }

    fn token() -> StandardToken {
        let Ok(t) = StandardToken::new(addr(0xaa)) else {
            panic!("valid token address");
        };
        t
    }

    #[test]
    fn rejects_zero_address() {
        assert_eq!(
            StandardToken::new(AccountId::zero()).map(|_| ()),
            Err(DexError::ZeroAddress)
        );
    }

    #[test]
    fn mint_credits_the_caller() {
        let mut t = token();
        assert!(t.mint(addr(1), Amount::new(1_000)).is_ok());
        assert_eq!(t.balance_of(addr(1)), Amount::new(1_000));
        assert_eq!(t.total_supply(), Amount::new(1_000));
    }

    #[test]
    fn transfer_from_requires_allowance() {
        let mut t = token();
        assert!(t.mint(addr(1), Amount::new(100)).is_ok());

        let denied = t.transfer_from(addr(9), addr(1), addr(2), Amount::new(10));
        assert!(matches!(
            denied,
            Err(DexError::InsufficientAllowance { .. })
        ));

        assert!(t.approve(addr(1), addr(9), Amount::new(10)).is_ok());
        assert!(
            t.transfer_from(addr(9), addr(1), addr(2), Amount::new(10))
                .is_ok()
        );
        assert_eq!(t.balance_of(addr(2)), Amount::new(10));
        assert_eq!(t.allowance(addr(1), addr(9)), Amount::ZERO);
    }

    #[test]
    fn failed_transfer_from_consumes_no_allowance() {
        let mut t = token();
        // Allowance present, balance absent.
        assert!(t.approve(addr(1), addr(9), Amount::new(50)).is_ok());
        let result = t.transfer_from(addr(9), addr(1), addr(2), Amount::new(50));
        assert!(matches!(result, Err(DexError::InsufficientBalance { .. })));
        assert_eq!(t.allowance(addr(1), addr(9)), Amount::new(50));
    }
}
