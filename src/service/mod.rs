//! Service layer: atomic operation orchestration.
//!
//! [`DexService`] coordinates pair creation, liquidity changes, and
//! swaps: it validates inputs, delegates accounting to the pool engine,
//! settles token legs with explicit rollback, and emits events through
//! the [`EventBus`](crate::domain::EventBus).

pub mod dex_service;

pub use dex_service::DexService;
