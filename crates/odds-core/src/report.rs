//! Everything the dashboard shows about a miner's solo odds, computed in one
//! pass.

use serde::{Deserialize, Serialize};

use crate::expected::{expected_time_to_first_success, ExpectedWait};
use crate::format::{format_btc, format_expected_years, format_hashrate, format_probability};
use crate::hashrate::Hashrate;
use crate::network::{NetworkParams, DAYS_PER_MONTH, DAYS_PER_YEAR};
use crate::probability::{probability_over_days, HashrateShare, Probability};
use crate::revenue::expected_btc_per_day;

/// Chance of finding a block over each dashboard window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowOdds {
    pub block: Probability,
    pub day: Probability,
    pub week: Probability,
    pub month: Probability,
    pub year: Probability,
}

/// Display strings for [`WindowOdds`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowOddsDisplay {
    pub block: String,
    pub day: String,
    pub week: String,
    pub month: String,
    pub year: String,
}

impl WindowOdds {
    pub fn compute(share: HashrateShare, blocks_per_day: f64) -> Self {
        let over = |days: f64| probability_over_days(share, days, blocks_per_day);
        WindowOdds {
            block: share.per_block(),
            day: over(1.0),
            week: over(7.0),
            month: over(DAYS_PER_MONTH),
            year: over(DAYS_PER_YEAR),
        }
    }

    pub fn display(&self) -> WindowOddsDisplay {
        WindowOddsDisplay {
            block: format_probability(self.block.value()),
            day: format_probability(self.day.value()),
            week: format_probability(self.week.value()),
            month: format_probability(self.month.value()),
            year: format_probability(self.year.value()),
        }
    }
}

/// Solo-mining odds for one hashrate against the current network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoloReport {
    pub hashrate: Hashrate,
    pub hashrate_display: String,
    pub network_hashrate: Hashrate,
    pub network_hashrate_display: String,
    pub share: HashrateShare,
    /// Share of the network as a percentage.
    pub network_percentage: f64,
    pub odds: WindowOdds,
    pub odds_display: WindowOddsDisplay,
    pub expected_days: ExpectedWait,
    pub expected_years: ExpectedWait,
    pub expected_time_display: String,
    pub expected_btc_per_day: f64,
    pub expected_btc_per_day_display: String,
}

impl SoloReport {
    pub fn compute(hashrate: Hashrate, network: &NetworkParams) -> Self {
        let network_hashrate = network.hashrate();
        let share = HashrateShare::of(hashrate, network_hashrate);
        let odds = WindowOdds::compute(share, network.blocks_per_day);
        let expected_days = expected_time_to_first_success(odds.block, network.blocks_per_day);
        let expected_years = expected_days.per(DAYS_PER_YEAR);
        let btc_per_day = expected_btc_per_day(hashrate, network);

        SoloReport {
            hashrate,
            hashrate_display: format_hashrate(hashrate),
            network_hashrate,
            network_hashrate_display: format_hashrate(network_hashrate),
            share,
            network_percentage: share.value() * 100.0,
            odds_display: odds.display(),
            odds,
            expected_days,
            expected_years,
            expected_time_display: format_expected_years(expected_years),
            expected_btc_per_day: btc_per_day,
            expected_btc_per_day_display: format_btc(btc_per_day),
        }
    }
}
