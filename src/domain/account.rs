//! Chain-agnostic account address.

use core::fmt;

use serde::{Serialize, Serializer};

/// A generic 32-byte address identifying any ledger participant: an
/// externally-owned account, a token, a pool, or a liquidity-share token.
///
/// All 32-byte sequences are valid addresses, so construction is
/// infallible. The all-zero address is reserved as a sentinel and is
/// rejected wherever a real token or account is required.
///
/// Displays and serializes as `0x`-prefixed lowercase hex.
///
/// # Examples
///
/// ```
/// use tidepool::domain::AccountId;
///
/// let addr = AccountId::from_bytes([1u8; 32]);
/// assert!(!addr.is_zero());
/// assert!(addr.to_string().starts_with("0x0101"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// Creates an `AccountId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns the all-zero sentinel address.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Returns `true` if this is the all-zero sentinel.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_round_trip() {
        let bytes = [42u8; 32];
        assert_eq!(AccountId::from_bytes(bytes).as_bytes(), bytes);
    }

    #[test]
    fn zero_sentinel() {
        assert!(AccountId::zero().is_zero());
        assert!(!AccountId::from_bytes([1u8; 32]).is_zero());
    }

    #[test]
    fn display_is_prefixed_hex() {
        let addr = AccountId::from_bytes([0xabu8; 32]);
        let s = addr.to_string();
        assert_eq!(s.len(), 2 + 64);
        assert!(s.starts_with("0xabab"));
    }

    #[test]
    fn serializes_as_hex_string() {
        let addr = AccountId::zero();
        let json = serde_json::to_string(&addr).unwrap_or_default();
        assert_eq!(json, format!("\"{addr}\""));
    }

    #[test]
    fn ordering_is_lexicographic() {
        let lo = AccountId::from_bytes([0u8; 32]);
        let hi = AccountId::from_bytes([1u8; 32]);
        assert!(lo < hi);
    }

    #[test]
    fn works_as_hashmap_key() {
        use std::collections::HashMap;
        let addr = AccountId::from_bytes([9u8; 32]);
        let mut map = HashMap::new();
        map.insert(addr, 1u8);
        assert_eq!(map.get(&addr), Some(&1));
    }
}
