//! Best-share tracking and the odds of beating the current best.
//!
//! A share at difficulty D takes D * 2^32 hashes on average, so share
//! arrivals above D form a Poisson process with rate
//! `hashrate / (D * 2^32)` per second.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::difficulty::expected_hashes;
use crate::expected::ExpectedWait;
use crate::format::{format_difficulty, format_time_duration};
use crate::hashrate::Hashrate;
use crate::probability::{probability_within, Probability};

const HOUR_SECS: f64 = 3_600.0;
const DAY_SECS: f64 = 86_400.0;
const WEEK_SECS: f64 = 604_800.0;

/// Kind of device that submitted a share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceKind {
    Bitaxe,
    Avalon,
}

/// A best-share observation reported by a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareRecord {
    pub device_name: String,
    pub device_kind: DeviceKind,
    pub difficulty: f64,
}

/// How likely the next best share is within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Medium,
    Low,
    VeryLow,
}

impl Confidence {
    /// Label from the probability of beating the best within 24 hours.
    pub fn from_day_probability(p: Probability) -> Self {
        if p.value() > 0.5 {
            Confidence::Medium
        } else if p.value() > 0.1 {
            Confidence::Low
        } else {
            Confidence::VeryLow
        }
    }
}

/// Prediction for beating the all-time best share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestSharePrediction {
    pub hashrate: Hashrate,
    pub best_difficulty: f64,
    pub best_difficulty_formatted: String,
    /// Expected hours until a share above the current best.
    pub expected_hours: ExpectedWait,
    pub expected_time_formatted: String,
    pub probability_1h: Probability,
    pub probability_24h: Probability,
    pub probability_7d: Probability,
    pub confidence: Confidence,
}

impl BestSharePrediction {
    pub fn compute(hashrate: Hashrate, best_difficulty: f64) -> Self {
        let rate = share_rate(hashrate, best_difficulty);
        let expected_hours = if rate > 0.0 {
            ExpectedWait::from_value(1.0 / rate).per(HOUR_SECS)
        } else {
            ExpectedWait::Unbounded
        };
        let probability_24h = probability_within(rate, DAY_SECS);

        BestSharePrediction {
            hashrate,
            best_difficulty,
            best_difficulty_formatted: format_difficulty(best_difficulty),
            expected_hours,
            expected_time_formatted: format_time_duration(expected_hours),
            probability_1h: probability_within(rate, HOUR_SECS),
            probability_24h,
            probability_7d: probability_within(rate, WEEK_SECS),
            confidence: Confidence::from_day_probability(probability_24h),
        }
    }
}

/// Shares per second at or above `difficulty`. Zero when either input is not
/// positive.
pub fn share_rate(hashrate: Hashrate, difficulty: f64) -> f64 {
    if !hashrate.is_positive() || !(difficulty > 0.0) {
        return 0.0;
    }
    hashrate.as_hs() / expected_hashes(difficulty)
}

/// The highest-difficulty record. On ties the earliest record wins.
pub fn all_time_best(records: &[ShareRecord]) -> Option<&ShareRecord> {
    records.iter().fold(None, |best: Option<&ShareRecord>, r| match best {
        Some(b) if b.difficulty >= r.difficulty => Some(b),
        _ => Some(r),
    })
}

/// Up to `limit` records by descending difficulty, dropping repeats of the
/// same device and difficulty.
pub fn top_shares(records: &[ShareRecord], limit: usize) -> Vec<ShareRecord> {
    let mut seen = HashSet::new();
    let mut unique: Vec<ShareRecord> = records
        .iter()
        .filter(|r| r.difficulty > 0.0)
        .filter(|r| seen.insert((r.device_name.clone(), r.difficulty.to_bits())))
        .cloned()
        .collect();
    unique.sort_by(|a, b| b.difficulty.total_cmp(&a.difficulty));
    unique.truncate(limit);
    unique
}

/// Latest readings from one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    pub device_name: String,
    pub device_kind: DeviceKind,
    #[serde(default)]
    pub hashrate_ghs: f64,
    #[serde(default)]
    pub power_watts: f64,
    #[serde(default)]
    pub temperature_c: f64,
    #[serde(default)]
    pub efficiency_j_per_th: f64,
    /// Best share difficulty the device has reported; zero when none.
    #[serde(default)]
    pub best_difficulty: f64,
    #[serde(default)]
    pub uptime_seconds: f64,
    #[serde(default)]
    pub shares_accepted: u64,
    #[serde(default)]
    pub shares_rejected: u64,
}

/// One row of the device comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceComparisonEntry {
    pub device_name: String,
    pub device_kind: DeviceKind,
    pub hashrate_ghs: f64,
    pub power_watts: f64,
    pub temperature_c: f64,
    pub efficiency_j_per_th: f64,
    pub best_difficulty: f64,
    pub best_difficulty_formatted: String,
    pub uptime_hours: f64,
    pub shares_accepted: u64,
    pub shares_rejected: u64,
}

impl From<&DeviceSnapshot> for DeviceComparisonEntry {
    fn from(snapshot: &DeviceSnapshot) -> Self {
        let best_difficulty = if snapshot.best_difficulty > 0.0 {
            snapshot.best_difficulty
        } else {
            0.0
        };
        DeviceComparisonEntry {
            device_name: snapshot.device_name.clone(),
            device_kind: snapshot.device_kind,
            hashrate_ghs: snapshot.hashrate_ghs,
            power_watts: snapshot.power_watts,
            temperature_c: snapshot.temperature_c,
            efficiency_j_per_th: snapshot.efficiency_j_per_th,
            best_difficulty,
            best_difficulty_formatted: format_difficulty(best_difficulty),
            uptime_hours: snapshot.uptime_seconds.max(0.0) / HOUR_SECS,
            shares_accepted: snapshot.shares_accepted,
            shares_rejected: snapshot.shares_rejected,
        }
    }
}

/// All devices side by side, fastest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceComparison {
    pub devices: Vec<DeviceComparisonEntry>,
    pub total_devices: usize,
}

impl DeviceComparison {
    pub fn compute(snapshots: &[DeviceSnapshot]) -> Self {
        let mut devices: Vec<DeviceComparisonEntry> =
            snapshots.iter().map(DeviceComparisonEntry::from).collect();
        devices.sort_by(|a, b| b.hashrate_ghs.total_cmp(&a.hashrate_ghs));
        DeviceComparison {
            total_devices: devices.len(),
            devices,
        }
    }
}
