//! Bitcoin network definitions and the parameters every odds calculation
//! reads from.

use serde::{Deserialize, Serialize};

use crate::difficulty::difficulty_to_hashrate;
use crate::hashrate::Hashrate;

/// Bitcoin network type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Bitcoin mainnet
    #[default]
    Mainnet,
    /// Bitcoin testnet4
    Testnet4,
}

impl Network {
    /// Calculate block subsidy in satoshis for a given height.
    ///
    /// The subsidy halves every 210,000 blocks, starting at 50 BTC.
    pub fn block_subsidy(&self, height: u32) -> u64 {
        let halvings = height / 210_000;
        if halvings >= 64 {
            return 0;
        }
        // 50 BTC = 5,000,000,000 satoshis
        5_000_000_000u64 >> halvings
    }

    /// Get the mempool.space API base URL for this network.
    pub fn mempool_api_url(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://mempool.space/api",
            Network::Testnet4 => "https://mempool.space/testnet4/api",
        }
    }

    /// Parse network from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" | "bitcoin" => Some(Network::Mainnet),
            "testnet4" | "testnet" | "test" => Some(Network::Testnet4),
            _ => None,
        }
    }

    /// Get network name as string.
    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet4 => "testnet4",
        }
    }
}

impl core::fmt::Display for Network {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Target spacing between blocks in seconds.
pub const BLOCK_INTERVAL_SECS: f64 = 600.0;

/// Blocks expected per day at the target spacing.
pub const BLOCKS_PER_DAY: f64 = 144.0;

/// Days per year used for every day-to-year conversion.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Days per month used for monthly projections.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Satoshis per bitcoin.
pub const SATS_PER_BTC: f64 = 100_000_000.0;

/// Network hashrate assumed until live data arrives, in EH/s.
pub const DEFAULT_NETWORK_HASHRATE_EHS: f64 = 650.0;

/// Network difficulty assumed until live data arrives.
pub const DEFAULT_NETWORK_DIFFICULTY: f64 = 95_000_000_000_000.0;

/// Height in the fourth subsidy era (3.125 BTC), used for the default reward.
const CURRENT_ERA_HEIGHT: u32 = 840_000;

/// Network-wide inputs to the odds calculations.
///
/// This is the only place the network hashrate, difficulty and reward
/// constants live. Views read them from here instead of hardcoding values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkParams {
    /// Total network hashrate in EH/s.
    pub hashrate_ehs: f64,
    /// Current network difficulty.
    pub difficulty: f64,
    /// Block reward in BTC.
    pub block_reward_btc: f64,
    /// BTC price in the configured fiat currency.
    pub btc_price: f64,
    /// Target seconds between blocks.
    pub block_interval_secs: f64,
    /// Blocks per day.
    pub blocks_per_day: f64,
}

impl Default for NetworkParams {
    fn default() -> Self {
        NetworkParams {
            hashrate_ehs: DEFAULT_NETWORK_HASHRATE_EHS,
            difficulty: DEFAULT_NETWORK_DIFFICULTY,
            block_reward_btc: Network::Mainnet.block_subsidy(CURRENT_ERA_HEIGHT) as f64
                / SATS_PER_BTC,
            btc_price: 0.0,
            block_interval_secs: BLOCK_INTERVAL_SECS,
            blocks_per_day: BLOCKS_PER_DAY,
        }
    }
}

impl NetworkParams {
    /// Parameters with the given network hashrate and default everything else.
    pub fn with_hashrate_ehs(hashrate_ehs: f64) -> Self {
        NetworkParams {
            hashrate_ehs,
            ..Self::default()
        }
    }

    /// Network hashrate in EH/s implied by a difficulty at this block
    /// interval.
    pub fn implied_hashrate_ehs(&self, difficulty: f64) -> f64 {
        Hashrate::from_hs(difficulty_to_hashrate(difficulty, self.block_interval_secs)).as_ehs()
    }

    /// Use the subsidy for the given height as the block reward.
    pub fn with_height(mut self, network: Network, height: u32) -> Self {
        self.block_reward_btc = network.block_subsidy(height) as f64 / SATS_PER_BTC;
        self
    }

    /// Network hashrate as a [`Hashrate`].
    pub fn hashrate(&self) -> Hashrate {
        Hashrate::from_ehs(self.hashrate_ehs)
    }

    /// Apply a network-data update; absent or non-positive values keep the
    /// current ones. A difficulty without a hashrate also sets the hashrate
    /// it implies.
    ///
    /// Returns whether any value was taken from the update.
    pub fn apply(&mut self, update: &NetworkUpdate) -> bool {
        let usable = |v: &f64| v.is_finite() && *v > 0.0;
        let hashrate = update.hashrate_ehs.filter(usable);
        let difficulty = update.difficulty.filter(usable);
        let price = update.btc_price.filter(usable);

        if let Some(difficulty) = difficulty {
            self.difficulty = difficulty;
        }
        match (hashrate, difficulty) {
            (Some(hashrate_ehs), _) => self.hashrate_ehs = hashrate_ehs,
            (None, Some(difficulty)) => self.hashrate_ehs = self.implied_hashrate_ehs(difficulty),
            (None, None) => {}
        }
        if let Some(price) = price {
            self.btc_price = price;
        }
        hashrate.is_some() || difficulty.is_some() || price.is_some()
    }
}

/// Fresh network figures from public APIs. Any field may be missing when its
/// source failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkUpdate {
    pub hashrate_ehs: Option<f64>,
    pub difficulty: Option<f64>,
    pub btc_price: Option<f64>,
}
