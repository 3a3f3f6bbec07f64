//! # tidepool
//!
//! In-memory constant-product AMM exchange: a pair registry that
//! deploys one isolated liquidity pool per unordered token pair, a pool
//! engine pricing swaps via `x · y = k` with an output-side fee, and a
//! liquidity-share token tracking proportional ownership of each pool's
//! reserves.
//!
//! The exchange is a pure state machine driven by discrete atomic
//! calls. Token collaborators are external: the engine consumes any
//! implementation of [`token::FungibleToken`] and never depends on a
//! concrete token type. There is no network surface and no persistence —
//! all state lives in the registry, the pools, and the token ledgers.
//!
//! ## Architecture
//!
//! ```text
//! Callers
//!     │
//!     ├── DexService (service/)      create pair, liquidity, swaps, quotes
//!     ├── EventBus (domain/)         broadcast of committed mutations
//!     │
//!     ├── PoolRegistry (domain/)     write-once pair directory, per-pool locks
//!     ├── LiquidityPool (pool/)      reserve accounting, share ownership
//!     │
//!     └── TokenDirectory (token/)    FungibleToken collaborators
//! ```
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use tidepool::config::DexConfig;
//! use tidepool::domain::{AccountId, Amount, EventBus, PoolRegistry};
//! use tidepool::service::DexService;
//! use tidepool::token::{FungibleToken, StandardToken, TokenDirectory};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), tidepool::error::DexError> {
//! let config = DexConfig::default();
//! let tokens = Arc::new(TokenDirectory::new());
//! let dex = DexService::new(
//!     &config,
//!     Arc::new(PoolRegistry::new()),
//!     Arc::clone(&tokens),
//!     EventBus::new(config.event_bus_capacity),
//! );
//!
//! // Two collaborator tokens and a funded trader account.
//! let trader = AccountId::from_bytes([9u8; 32]);
//! let rain = tokens
//!     .register(Box::new(StandardToken::new(AccountId::from_bytes([1u8; 32]))?))
//!     .await?;
//! let mist = tokens
//!     .register(Box::new(StandardToken::new(AccountId::from_bytes([2u8; 32]))?))
//!     .await?;
//! for token in [rain, mist] {
//!     let handle = tokens.get(token).await?;
//!     let mut token = handle.write().await;
//!     token.mint(trader, Amount::new(1_000_000))?;
//!     token.approve(trader, dex.address(), Amount::new(1_000_000))?;
//! }
//!
//! // Create and seed the pool, then quote a swap against it.
//! let pool = dex
//!     .create_new_pair(trader, rain, mist, Amount::new(100_000), Amount::new(100_000))
//!     .await?;
//! let quote = dex.token_two_quantity(pool, Amount::new(3_000)).await?;
//! assert!(quote.get() > 0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value newtypes ([`Amount`](domain::Amount), [`AccountId`](domain::AccountId), [`PairKey`](domain::PairKey)), the [`PoolRegistry`](domain::PoolRegistry), and the event system |
//! | [`token`] | [`FungibleToken`](token::FungibleToken) collaborator trait, ledgers, and the [`TokenDirectory`](token::TokenDirectory) |
//! | [`pool`] | [`LiquidityPool`](pool::LiquidityPool) constant-product accounting |
//! | [`service`] | [`DexService`](service::DexService) atomic operation orchestration |
//! | [`config`] | [`DexConfig`](config::DexConfig) environment-driven settings |
//! | [`error`] | [`DexError`](error::DexError) unified error enum |

pub mod config;
pub mod domain;
pub mod error;
pub mod pool;
pub mod service;
pub mod token;
