//! Canonical directory key for an unordered token pair.

use super::AccountId;
use crate::error::DexError;

/// The unordered identity of a token pair, canonically sorted by address.
///
/// The registry directory is keyed by `PairKey`, so `(A, B)` and `(B, A)`
/// resolve to the same entry and a second pool for a reversed pair is
/// impossible. The key is identity only — the pool itself preserves the
/// creator's argument order, because its operations are side-sensitive.
///
/// # Examples
///
/// ```
/// use tidepool::domain::{AccountId, PairKey};
///
/// let a = AccountId::from_bytes([1u8; 32]);
/// let b = AccountId::from_bytes([2u8; 32]);
/// let forward = PairKey::new(a, b).expect("distinct tokens");
/// let reversed = PairKey::new(b, a).expect("distinct tokens");
/// assert_eq!(forward, reversed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairKey {
    lower: AccountId,
    higher: AccountId,
}

impl PairKey {
    /// Creates a canonical key from two token addresses in any order.
    ///
    /// # Errors
    ///
    /// - [`DexError::IdenticalTokens`] if both addresses are equal.
    /// - [`DexError::ZeroAddress`] if either address is the zero sentinel.
    pub fn new(token_one: AccountId, token_two: AccountId) -> Result<Self, DexError> {
        if token_one.is_zero() || token_two.is_zero() {
            return Err(DexError::ZeroAddress);
        }
        if token_one == token_two {
            return Err(DexError::IdenticalTokens);
        }
        let (lower, higher) = if token_one < token_two {
            (token_one, token_two)
        } else {
            (token_two, token_one)
        };
        Ok(Self { lower, higher })
    }

    /// Returns the lower-sorted token address.
    #[must_use]
    pub const fn lower(&self) -> AccountId {
        self.lower
    }

    /// Returns the higher-sorted token address.
    #[must_use]
    pub const fn higher(&self) -> AccountId {
        self.higher
    }

    /// Returns `true` if the given token is one of the pair's sides.
    #[must_use]
    pub fn contains(&self, token: AccountId) -> bool {
        self.lower == token || self.higher == token
    }
}
