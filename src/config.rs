//! Exchange configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`), with sensible defaults when a
//! variable is unset or unparsable.

use crate::error::DexError;

/// Default swap fee, in percent of the raw output.
const DEFAULT_SWAP_FEE_PERCENT: u32 = 3;

/// Default capacity of the event broadcast channel.
const DEFAULT_EVENT_BUS_CAPACITY: usize = 1_024;

/// Top-level exchange configuration.
///
/// Loaded once at startup via [`DexConfig::from_env`], or constructed
/// directly for tests.
#[derive(Debug, Clone)]
pub struct DexConfig {
    /// Swap fee taken from the output side, in whole percent (0–99).
    pub swap_fee_percent: u32,

    /// Capacity of the [`EventBus`](crate::domain::EventBus) ring buffer.
    pub event_bus_capacity: usize,
}

impl DexConfig {
    /// Loads configuration from environment variables.
    ///
    /// Recognized keys: `DEX_SWAP_FEE_PERCENT`, `DEX_EVENT_BUS_CAPACITY`.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the configured fee is 100% or
    /// more — such a fee would consume every swap's entire output.
    pub fn from_env() -> Result<Self, DexError> {
        dotenvy::dotenv().ok();

        let config = Self {
            swap_fee_percent: parse_env("DEX_SWAP_FEE_PERCENT", DEFAULT_SWAP_FEE_PERCENT),
            event_bus_capacity: parse_env("DEX_EVENT_BUS_CAPACITY", DEFAULT_EVENT_BUS_CAPACITY),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the configured values for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the fee is 100% or more.
    pub fn validate(&self) -> Result<(), DexError> {
        if self.swap_fee_percent >= 100 {
            return Err(DexError::Overflow("swap fee must be below 100 percent"));
        }
        Ok(())
    }
}

impl Default for DexConfig {
    fn default() -> Self {
        Self {
            swap_fee_percent: DEFAULT_SWAP_FEE_PERCENT,
            event_bus_capacity: DEFAULT_EVENT_BUS_CAPACITY,
        }
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
