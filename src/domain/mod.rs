//! Domain layer: core value types, the pair directory, and the event
//! system.
//!
//! Newtypes ([`Amount`], [`AccountId`], [`PairKey`], [`PoolId`]) keep
//! raw integers and byte arrays from leaking across the crate;
//! [`PoolRegistry`] is the concurrent pool directory and
//! [`EventBus`]/[`PoolEvent`] broadcast committed state changes.

pub mod account;
pub mod amount;
pub mod event_bus;
pub mod pair_key;
pub mod pool_event;
pub mod pool_id;
pub mod pool_registry;

pub use account::AccountId;
pub use amount::Amount;
pub use event_bus::EventBus;
pub use pair_key::PairKey;
pub use pool_event::PoolEvent;
pub use pool_id::PoolId;
pub use pool_registry::{PoolHandle, PoolRegistry};
