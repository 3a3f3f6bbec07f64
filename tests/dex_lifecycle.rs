//! End-to-end exchange lifecycle tests.
//!
//! Exercises the full public surface through [`DexService`]: pair
//! creation, proportion checks, liquidity addition and removal, quotes,
//! swaps in both directions, share transfers, event payloads, and
//! rollback on collaborator failure.

#![allow(clippy::panic)]

use std::sync::Arc;

use tidepool::config::DexConfig;
use tidepool::domain::{AccountId, Amount, EventBus, PoolEvent, PoolRegistry};
use tidepool::error::DexError;
use tidepool::service::DexService;
use tidepool::token::{FungibleToken, StandardToken, TokenDirectory};

const UNIT: u128 = 1_000_000_000;
const INITIAL_ACCOUNT_BALANCE: u128 = 1_000 * UNIT;
const INITIAL_TOKEN_AMOUNT: u128 = 100 * UNIT;
const LIQUIDITY_ADDITION: u128 = UNIT;
const FEE_PERCENT: u128 = 3;

fn addr(byte: u8) -> AccountId {
    AccountId::from_bytes([byte; 32])
}

fn token_one() -> AccountId {
    addr(1)
}

fn token_two() -> AccountId {
    addr(2)
}

fn provider() -> AccountId {
    addr(0x11)
}

fn trader() -> AccountId {
    addr(0x22)
}

fn outsider() -> AccountId {
    addr(0x33)
}

async fn setup() -> DexService {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();

    let tokens = Arc::new(TokenDirectory::new());
    for address in [token_one(), token_two()] {
        let Ok(token) = StandardToken::new(address) else {
            panic!("valid token address");
        };
        let Ok(_) = tokens.register(Box::new(token)).await else {
            panic!("token registration failed");
        };
    }

    let config = DexConfig::default();
    let dex = DexService::new(
        &config,
        Arc::new(PoolRegistry::new()),
        tokens,
        EventBus::new(config.event_bus_capacity),
    );

    // Faucet balances for every test account.
    for account in [provider(), trader(), outsider()] {
        for token in [token_one(), token_two()] {
            mint(&dex, token, account, INITIAL_ACCOUNT_BALANCE).await;
        }
    }
    dex
}

async fn mint(dex: &DexService, token: AccountId, account: AccountId, value: u128) {
    let Ok(handle) = dex.tokens().get(token).await else {
        panic!("token missing");
    };
    let mut token = handle.write().await;
    let Ok(()) = token.mint(account, Amount::new(value)) else {
        panic!("mint failed");
    };
}

async fn approve(dex: &DexService, token: AccountId, owner: AccountId, spender: AccountId, value: u128) {
    let Ok(handle) = dex.tokens().get(token).await else {
        panic!("token missing");
    };
    let mut token = handle.write().await;
    let Ok(()) = token.approve(owner, spender, Amount::new(value)) else {
        panic!("approve failed");
    };
}

async fn balance_of(dex: &DexService, token: AccountId, account: AccountId) -> u128 {
    let Ok(handle) = dex.tokens().get(token).await else {
        panic!("token missing");
    };
    let token = handle.read().await;
    token.balance_of(account).get()
}

/// Creates the canonical test pool seeded with `INITIAL_TOKEN_AMOUNT` of
/// each token by `provider`.
async fn create_pool(dex: &DexService) -> AccountId {
    approve(dex, token_one(), provider(), dex.address(), INITIAL_TOKEN_AMOUNT).await;
    approve(dex, token_two(), provider(), dex.address(), INITIAL_TOKEN_AMOUNT).await;
    let Ok(pool) = dex
        .create_new_pair(
            provider(),
            token_one(),
            token_two(),
            Amount::new(INITIAL_TOKEN_AMOUNT),
            Amount::new(INITIAL_TOKEN_AMOUNT),
        )
        .await
    else {
        panic!("pair creation failed");
    };
    pool
}

/// The quote formula the engine must match bit-for-bit.
fn expected_out(reserve_in: u128, reserve_out: u128, amount_in: u128) -> u128 {
    let raw = reserve_out - reserve_in * reserve_out / (reserve_in + amount_in);
    let fee = raw * FEE_PERCENT / 100;
    raw - fee
}

// ---------------------------------------------------------------------------
// Pair creation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_pair_initializes_pool_data() {
    let dex = setup().await;
    let pool = create_pool(&dex).await;

    let Ok(summary) = dex.pool_summary(pool).await else {
        panic!("expected Ok");
    };
    assert_eq!(summary.pool_creator, provider());
    assert_eq!(summary.token_one, token_one());
    assert_eq!(summary.token_two, token_two());
    assert!(!summary.share_address.is_zero());
    assert_ne!(summary.share_address, pool);

    let Ok(lookup) = dex.pool_of_pair(token_two(), token_one()).await else {
        panic!("expected Ok");
    };
    assert_eq!(lookup, Some(pool));

    let listed = dex.list_pools().await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed.first().map(|s| s.pool_address), Some(pool));
}

#[tokio::test]
async fn create_pair_moves_seed_liquidity_into_the_pool() {
    let dex = setup().await;
    let pool = create_pool(&dex).await;

    assert_eq!(balance_of(&dex, token_one(), pool).await, INITIAL_TOKEN_AMOUNT);
    assert_eq!(balance_of(&dex, token_two(), pool).await, INITIAL_TOKEN_AMOUNT);
    assert_eq!(
        balance_of(&dex, token_one(), provider()).await,
        INITIAL_ACCOUNT_BALANCE - INITIAL_TOKEN_AMOUNT
    );
}

#[tokio::test]
async fn create_pair_mints_creation_shares() {
    let dex = setup().await;
    let pool = create_pool(&dex).await;

    let Ok(shares) = dex.share_balance_of(pool, provider()).await else {
        panic!("expected Ok");
    };
    assert_eq!(shares, Amount::new(INITIAL_TOKEN_AMOUNT));
}

#[tokio::test]
async fn create_pair_emits_pool_created() {
    let dex = setup().await;
    let mut events = dex.event_bus().subscribe();
    let pool = create_pool(&dex).await;

    let Ok(event) = events.recv().await else {
        panic!("missing event");
    };
    let PoolEvent::PoolCreated {
        pool_address,
        token_one: event_one,
        token_two: event_two,
        init_amount_one,
        init_amount_two,
        pool_creator,
        ..
    } = event
    else {
        panic!("wrong event variant");
    };
    assert_eq!(pool_address, pool);
    assert_eq!(event_one, token_one());
    assert_eq!(event_two, token_two());
    assert_eq!(init_amount_one, Amount::new(INITIAL_TOKEN_AMOUNT));
    assert_eq!(init_amount_two, Amount::new(INITIAL_TOKEN_AMOUNT));
    assert_eq!(pool_creator, provider());
}

#[tokio::test]
async fn create_pair_validation_failures() {
    let dex = setup().await;

    let zero_amount = dex
        .create_new_pair(provider(), token_one(), token_two(), Amount::ZERO, Amount::new(1))
        .await;
    assert_eq!(zero_amount, Err(DexError::MustSendSomeTokens));

    let identical = dex
        .create_new_pair(
            provider(),
            token_one(),
            token_one(),
            Amount::new(1),
            Amount::new(1),
        )
        .await;
    assert_eq!(identical, Err(DexError::IdenticalTokens));

    let unknown = dex
        .create_new_pair(provider(), token_one(), addr(7), Amount::new(1), Amount::new(1))
        .await;
    assert_eq!(unknown, Err(DexError::TokenNotFound(addr(7))));
}

#[tokio::test]
async fn duplicate_pair_is_rejected() {
    let dex = setup().await;
    let pool = create_pool(&dex).await;

    approve(&dex, token_one(), trader(), dex.address(), UNIT).await;
    approve(&dex, token_two(), trader(), dex.address(), UNIT).await;
    let duplicate = dex
        .create_new_pair(
            trader(),
            token_two(),
            token_one(),
            Amount::new(UNIT),
            Amount::new(UNIT),
        )
        .await;
    assert_eq!(duplicate, Err(DexError::DuplicatePair(pool)));
}

// ---------------------------------------------------------------------------
// Liquidity proportion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn proportion_returns_matching_amounts_unchanged() {
    let dex = setup().await;
    let pool = create_pool(&dex).await;

    let Ok(adjusted) = dex
        .liquidity_proportion(
            pool,
            Amount::new(INITIAL_TOKEN_AMOUNT),
            Amount::new(INITIAL_TOKEN_AMOUNT),
        )
        .await
    else {
        panic!("expected Ok");
    };
    assert_eq!(
        adjusted,
        (
            Amount::new(INITIAL_TOKEN_AMOUNT),
            Amount::new(INITIAL_TOKEN_AMOUNT)
        )
    );
}

#[tokio::test]
async fn proportion_caps_the_excess_side() {
    let dex = setup().await;
    let pool = create_pool(&dex).await;

    // Input ratio below the pool ratio: token two is scaled down.
    let Ok(low) = dex
        .liquidity_proportion(pool, Amount::new(50 * UNIT), Amount::new(70 * UNIT))
        .await
    else {
        panic!("expected Ok");
    };
    assert_eq!(low, (Amount::new(50 * UNIT), Amount::new(50 * UNIT)));

    // Input ratio above the pool ratio: token one is scaled down.
    let Ok(high) = dex
        .liquidity_proportion(pool, Amount::new(10 * UNIT), Amount::new(4 * UNIT))
        .await
    else {
        panic!("expected Ok");
    };
    assert_eq!(high, (Amount::new(4 * UNIT), Amount::new(4 * UNIT)));
}

// ---------------------------------------------------------------------------
// Add liquidity
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_liquidity_rejects_zero_amounts() {
    let dex = setup().await;
    let pool = create_pool(&dex).await;

    assert_eq!(
        dex.add_liquidity(provider(), pool, Amount::ZERO, Amount::ZERO)
            .await,
        Err(DexError::MustSendSomeTokens)
    );
}

#[tokio::test]
async fn add_liquidity_pulls_tokens_into_the_pool() {
    let dex = setup().await;
    let pool = create_pool(&dex).await;

    approve(&dex, token_one(), provider(), pool, LIQUIDITY_ADDITION).await;
    approve(&dex, token_two(), provider(), pool, LIQUIDITY_ADDITION).await;

    let before_one = balance_of(&dex, token_one(), pool).await;
    let before_two = balance_of(&dex, token_two(), pool).await;

    let Ok(_) = dex
        .add_liquidity(
            provider(),
            pool,
            Amount::new(LIQUIDITY_ADDITION),
            Amount::new(LIQUIDITY_ADDITION),
        )
        .await
    else {
        panic!("expected Ok");
    };

    assert_eq!(
        balance_of(&dex, token_one(), pool).await,
        before_one + LIQUIDITY_ADDITION
    );
    assert_eq!(
        balance_of(&dex, token_two(), pool).await,
        before_two + LIQUIDITY_ADDITION
    );
}

#[tokio::test]
async fn add_liquidity_mints_by_the_post_deposit_formula() {
    let dex = setup().await;
    let pool = create_pool(&dex).await;

    approve(&dex, token_one(), provider(), pool, LIQUIDITY_ADDITION).await;
    approve(&dex, token_two(), provider(), pool, LIQUIDITY_ADDITION).await;

    let expected_mint =
        LIQUIDITY_ADDITION * INITIAL_TOKEN_AMOUNT / (INITIAL_TOKEN_AMOUNT + LIQUIDITY_ADDITION);

    let Ok(minted) = dex
        .add_liquidity(
            provider(),
            pool,
            Amount::new(LIQUIDITY_ADDITION),
            Amount::new(LIQUIDITY_ADDITION),
        )
        .await
    else {
        panic!("expected Ok");
    };
    assert_eq!(minted, Amount::new(expected_mint));

    let Ok(shares) = dex.share_balance_of(pool, provider()).await else {
        panic!("expected Ok");
    };
    assert_eq!(shares, Amount::new(INITIAL_TOKEN_AMOUNT + expected_mint));
}

#[tokio::test]
async fn add_liquidity_emits_event_with_adjusted_amounts() {
    let dex = setup().await;
    let pool = create_pool(&dex).await;
    let mut events = dex.event_bus().subscribe();

    approve(&dex, token_one(), trader(), pool, 10 * UNIT).await;
    approve(&dex, token_two(), trader(), pool, 10 * UNIT).await;

    // Excess token two gets scaled down to the pool ratio before the pull.
    let Ok(minted) = dex
        .add_liquidity(trader(), pool, Amount::new(2 * UNIT), Amount::new(5 * UNIT))
        .await
    else {
        panic!("expected Ok");
    };

    let Ok(event) = events.recv().await else {
        panic!("missing event");
    };
    let PoolEvent::LiquidityAdded {
        provider: event_provider,
        amount_one,
        amount_two,
        minted: event_minted,
        ..
    } = event
    else {
        panic!("wrong event variant");
    };
    assert_eq!(event_provider, trader());
    assert_eq!(amount_one, Amount::new(2 * UNIT));
    assert_eq!(amount_two, Amount::new(2 * UNIT));
    assert_eq!(event_minted, minted);
}

#[tokio::test]
async fn failed_second_leg_rolls_back_the_first() {
    let dex = setup().await;
    let pool = create_pool(&dex).await;

    // Approve token one only; the token-two pull must fail.
    approve(&dex, token_one(), trader(), pool, LIQUIDITY_ADDITION).await;

    let before_one = balance_of(&dex, token_one(), trader()).await;
    let result = dex
        .add_liquidity(
            trader(),
            pool,
            Amount::new(LIQUIDITY_ADDITION),
            Amount::new(LIQUIDITY_ADDITION),
        )
        .await;
    assert!(matches!(result, Err(DexError::InsufficientAllowance { .. })));

    // Balances and reserves are exactly as before the call.
    assert_eq!(balance_of(&dex, token_one(), trader()).await, before_one);
    assert_eq!(
        balance_of(&dex, token_one(), pool).await,
        INITIAL_TOKEN_AMOUNT
    );
    let Ok(summary) = dex.pool_summary(pool).await else {
        panic!("expected Ok");
    };
    assert_eq!(summary.reserve_one, Amount::new(INITIAL_TOKEN_AMOUNT));
    assert_eq!(summary.reserve_two, Amount::new(INITIAL_TOKEN_AMOUNT));
}

// ---------------------------------------------------------------------------
// Remove liquidity
// ---------------------------------------------------------------------------

#[tokio::test]
async fn remove_liquidity_rejects_non_providers() {
    let dex = setup().await;
    let pool = create_pool(&dex).await;

    assert_eq!(
        dex.remove_liquidity(outsider(), pool).await,
        Err(DexError::NoLiquidityAvailable)
    );
}

#[tokio::test]
async fn remove_liquidity_pays_the_proportional_slice() {
    let dex = setup().await;
    let pool = create_pool(&dex).await;

    // A second provider joins with a small deposit.
    approve(&dex, token_one(), trader(), pool, LIQUIDITY_ADDITION).await;
    approve(&dex, token_two(), trader(), pool, LIQUIDITY_ADDITION).await;
    let Ok(minted) = dex
        .add_liquidity(
            trader(),
            pool,
            Amount::new(LIQUIDITY_ADDITION),
            Amount::new(LIQUIDITY_ADDITION),
        )
        .await
    else {
        panic!("expected Ok");
    };

    let pool_one = balance_of(&dex, token_one(), pool).await;
    let pool_two = balance_of(&dex, token_two(), pool).await;
    let supply = INITIAL_TOKEN_AMOUNT + minted.get();
    let expected_one = minted.get() * pool_one / supply;
    let expected_two = minted.get() * pool_two / supply;

    let account_one = balance_of(&dex, token_one(), trader()).await;
    let Ok((out_one, out_two)) = dex.remove_liquidity(trader(), pool).await else {
        panic!("expected Ok");
    };
    assert_eq!(out_one, Amount::new(expected_one));
    assert_eq!(out_two, Amount::new(expected_two));

    assert_eq!(
        balance_of(&dex, token_one(), pool).await,
        pool_one - expected_one
    );
    assert_eq!(
        balance_of(&dex, token_one(), trader()).await,
        account_one + expected_one
    );

    // The whole share balance was burned.
    let Ok(shares) = dex.share_balance_of(pool, trader()).await else {
        panic!("expected Ok");
    };
    assert_eq!(shares, Amount::ZERO);
}

#[tokio::test]
async fn sole_provider_round_trip_returns_the_exact_deposit() {
    let dex = setup().await;
    let pool = create_pool(&dex).await;

    let Ok((out_one, out_two)) = dex.remove_liquidity(provider(), pool).await else {
        panic!("expected Ok");
    };
    assert_eq!(out_one, Amount::new(INITIAL_TOKEN_AMOUNT));
    assert_eq!(out_two, Amount::new(INITIAL_TOKEN_AMOUNT));
    assert_eq!(
        balance_of(&dex, token_one(), provider()).await,
        INITIAL_ACCOUNT_BALANCE
    );

    // The pool is drained but still registered, and can be re-funded
    // at a brand-new ratio.
    let Ok(summary) = dex.pool_summary(pool).await else {
        panic!("expected Ok");
    };
    assert_eq!(summary.reserve_one, Amount::ZERO);
    assert_eq!(summary.reserve_two, Amount::ZERO);

    approve(&dex, token_one(), trader(), pool, 10 * UNIT).await;
    approve(&dex, token_two(), trader(), pool, 30 * UNIT).await;
    let Ok(minted) = dex
        .add_liquidity(trader(), pool, Amount::new(10 * UNIT), Amount::new(30 * UNIT))
        .await
    else {
        panic!("expected Ok");
    };
    assert_eq!(minted, Amount::new(10 * UNIT));
    let Ok(summary) = dex.pool_summary(pool).await else {
        panic!("expected Ok");
    };
    assert_eq!(summary.reserve_one, Amount::new(10 * UNIT));
    assert_eq!(summary.reserve_two, Amount::new(30 * UNIT));
}

#[tokio::test]
async fn remove_liquidity_emits_event() {
    let dex = setup().await;
    let pool = create_pool(&dex).await;
    let mut events = dex.event_bus().subscribe();

    let Ok((out_one, out_two)) = dex.remove_liquidity(provider(), pool).await else {
        panic!("expected Ok");
    };

    let Ok(event) = events.recv().await else {
        panic!("missing event");
    };
    let PoolEvent::LiquidityRemoved {
        provider: event_provider,
        amount_one,
        amount_two,
        ..
    } = event
    else {
        panic!("wrong event variant");
    };
    assert_eq!(event_provider, provider());
    assert_eq!(amount_one, out_one);
    assert_eq!(amount_two, out_two);
}

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn token_two_quote_matches_the_formula() {
    let dex = setup().await;
    let pool = create_pool(&dex).await;

    let amount_in = 3 * UNIT;
    let Ok(out) = dex.token_two_quantity(pool, Amount::new(amount_in)).await else {
        panic!("expected Ok");
    };
    assert_eq!(
        out.get(),
        expected_out(INITIAL_TOKEN_AMOUNT, INITIAL_TOKEN_AMOUNT, amount_in)
    );
}

#[tokio::test]
async fn token_one_quote_matches_the_formula() {
    let dex = setup().await;
    let pool = create_pool(&dex).await;

    let amount_in = 7 * UNIT;
    let Ok(out) = dex.token_one_quantity(pool, Amount::new(amount_in)).await else {
        panic!("expected Ok");
    };
    assert_eq!(
        out.get(),
        expected_out(INITIAL_TOKEN_AMOUNT, INITIAL_TOKEN_AMOUNT, amount_in)
    );
}

// ---------------------------------------------------------------------------
// Swaps
// ---------------------------------------------------------------------------

#[tokio::test]
async fn swap_rejects_zero_input() {
    let dex = setup().await;
    let pool = create_pool(&dex).await;

    assert_eq!(
        dex.swap_token_one_for_two(trader(), pool, Amount::ZERO).await,
        Err(DexError::MustSendSomeTokens)
    );
    assert_eq!(
        dex.swap_token_two_for_one(trader(), pool, Amount::ZERO).await,
        Err(DexError::MustSendSomeTokens)
    );
}

#[tokio::test]
async fn swap_one_for_two_settles_exact_amounts() {
    let dex = setup().await;
    let pool = create_pool(&dex).await;

    let amount_in = 5 * UNIT;
    let Ok(quoted) = dex.token_two_quantity(pool, Amount::new(amount_in)).await else {
        panic!("expected Ok");
    };

    approve(&dex, token_one(), trader(), pool, amount_in).await;
    let Ok(out) = dex
        .swap_token_one_for_two(trader(), pool, Amount::new(amount_in))
        .await
    else {
        panic!("expected Ok");
    };
    assert_eq!(out, quoted);

    assert_eq!(
        balance_of(&dex, token_one(), pool).await,
        INITIAL_TOKEN_AMOUNT + amount_in
    );
    assert_eq!(
        balance_of(&dex, token_two(), pool).await,
        INITIAL_TOKEN_AMOUNT - out.get()
    );
    assert_eq!(
        balance_of(&dex, token_one(), trader()).await,
        INITIAL_ACCOUNT_BALANCE - amount_in
    );
    assert_eq!(
        balance_of(&dex, token_two(), trader()).await,
        INITIAL_ACCOUNT_BALANCE + out.get()
    );
}

#[tokio::test]
async fn swap_two_for_one_settles_exact_amounts() {
    let dex = setup().await;
    let pool = create_pool(&dex).await;

    let amount_in = 24 * UNIT / 10;
    let Ok(quoted) = dex.token_one_quantity(pool, Amount::new(amount_in)).await else {
        panic!("expected Ok");
    };

    approve(&dex, token_two(), trader(), pool, amount_in).await;
    let Ok(out) = dex
        .swap_token_two_for_one(trader(), pool, Amount::new(amount_in))
        .await
    else {
        panic!("expected Ok");
    };
    assert_eq!(out, quoted);

    assert_eq!(
        balance_of(&dex, token_two(), pool).await,
        INITIAL_TOKEN_AMOUNT + amount_in
    );
    assert_eq!(
        balance_of(&dex, token_one(), pool).await,
        INITIAL_TOKEN_AMOUNT - out.get()
    );
}

#[tokio::test]
async fn swap_emits_event_with_token_sides() {
    let dex = setup().await;
    let pool = create_pool(&dex).await;
    let mut events = dex.event_bus().subscribe();

    let amount_in = 5 * UNIT;
    approve(&dex, token_one(), trader(), pool, amount_in).await;
    let Ok(out) = dex
        .swap_token_one_for_two(trader(), pool, Amount::new(amount_in))
        .await
    else {
        panic!("expected Ok");
    };

    let Ok(event) = events.recv().await else {
        panic!("missing event");
    };
    let PoolEvent::SwapExecuted {
        trader: event_trader,
        token_in,
        token_out,
        amount_in: event_in,
        amount_out: event_out,
        ..
    } = event
    else {
        panic!("wrong event variant");
    };
    assert_eq!(event_trader, trader());
    assert_eq!(token_in, token_one());
    assert_eq!(token_out, token_two());
    assert_eq!(event_in, Amount::new(amount_in));
    assert_eq!(event_out, out);
}

#[tokio::test]
async fn swaps_never_shrink_the_product() {
    let dex = setup().await;
    let pool = create_pool(&dex).await;

    approve(&dex, token_one(), trader(), pool, 100 * UNIT).await;
    approve(&dex, token_two(), trader(), pool, 100 * UNIT).await;

    let mut k = INITIAL_TOKEN_AMOUNT * INITIAL_TOKEN_AMOUNT;
    for amount_in in [UNIT, 3 * UNIT, 7 * UNIT] {
        let Ok(_) = dex
            .swap_token_one_for_two(trader(), pool, Amount::new(amount_in))
            .await
        else {
            panic!("expected Ok");
        };
        let Ok(summary) = dex.pool_summary(pool).await else {
            panic!("expected Ok");
        };
        let k_after = summary.reserve_one.get() * summary.reserve_two.get();
        assert!(k_after >= k);
        k = k_after;
    }
}

// ---------------------------------------------------------------------------
// Share transfer
// ---------------------------------------------------------------------------

#[tokio::test]
async fn transferred_position_is_redeemable_by_the_recipient() {
    let dex = setup().await;
    let pool = create_pool(&dex).await;

    let Ok(()) = dex
        .transfer_shares(provider(), pool, trader(), Amount::new(INITIAL_TOKEN_AMOUNT))
        .await
    else {
        panic!("expected Ok");
    };

    assert_eq!(
        dex.remove_liquidity(provider(), pool).await,
        Err(DexError::NoLiquidityAvailable)
    );

    let Ok((out_one, out_two)) = dex.remove_liquidity(trader(), pool).await else {
        panic!("expected Ok");
    };
    assert_eq!(out_one, Amount::new(INITIAL_TOKEN_AMOUNT));
    assert_eq!(out_two, Amount::new(INITIAL_TOKEN_AMOUNT));
}
