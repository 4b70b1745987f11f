//! Solo-mining odds engine for the miner dashboard.
//!
//! This crate provides pure Rust implementations of:
//! - Probability of finding at least one block over a window
//! - Expected time until the first block
//! - Formatting of counts, probabilities, durations and hashrates
//! - Network parameters and difficulty conversions
//! - Best-share prediction and energy cost analysis

pub mod difficulty;
pub mod expected;
pub mod format;
pub mod hashrate;
pub mod network;
pub mod probability;
pub mod report;
pub mod revenue;
pub mod share;

pub use difficulty::{difficulty_to_hashrate, expected_hashes};
pub use expected::{expected_time_to_first_success, ExpectedWait};
pub use format::{format_count, format_expected_years, format_probability};
pub use hashrate::Hashrate;
pub use network::{Network, NetworkParams, NetworkUpdate};
pub use probability::{probability_at_least_one, HashrateShare, Probability};
pub use report::SoloReport;
pub use revenue::{CostAnalysis, EnergySettings};
pub use share::{BestSharePrediction, ShareRecord};
