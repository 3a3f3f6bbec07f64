//! Token layer: the collaborator interface and in-crate ledgers.
//!
//! The exchange consumes external tokens only through the
//! [`FungibleToken`] trait, resolved by address via [`TokenDirectory`].
//! [`BalanceLedger`] is the shared bookkeeping core; [`StandardToken`]
//! is the open-mint reference implementation for tests and demos, and
//! [`LiquidityShare`] is the pool-owned ownership token.

pub mod directory;
pub mod fungible;
pub mod ledger;
pub mod share;
pub mod standard;

pub use directory::{TokenDirectory, TokenHandle};
pub use fungible::FungibleToken;
pub use ledger::BalanceLedger;
pub use share::LiquidityShare;
pub use standard::StandardToken;
