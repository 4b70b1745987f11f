//! Expected time until the first block.

use serde::{Deserialize, Serialize};

use crate::network::DAYS_PER_YEAR;
use crate::probability::Probability;

/// Mean waiting time until the first success.
///
/// A zero per-trial probability has no finite mean. It is carried as
/// `Unbounded` through every conversion instead of letting an IEEE infinity
/// reach the formatters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ExpectedWait {
    Finite(f64),
    Unbounded,
}

impl ExpectedWait {
    /// Wrap a raw value; non-finite or negative values are unbounded.
    pub fn from_value(value: f64) -> Self {
        if value.is_finite() && value >= 0.0 {
            ExpectedWait::Finite(value)
        } else {
            ExpectedWait::Unbounded
        }
    }

    /// Convert into a larger unit, e.g. days into years with `365`.
    pub fn per(self, units: f64) -> Self {
        match self {
            ExpectedWait::Finite(v) if units > 0.0 => ExpectedWait::from_value(v / units),
            _ => ExpectedWait::Unbounded,
        }
    }

    /// Convert into a smaller unit, e.g. days into hours with `24`.
    pub fn times(self, factor: f64) -> Self {
        match self {
            ExpectedWait::Finite(v) if factor >= 0.0 => ExpectedWait::from_value(v * factor),
            _ => ExpectedWait::Unbounded,
        }
    }

    /// The finite value, if any.
    pub fn finite(&self) -> Option<f64> {
        match self {
            ExpectedWait::Finite(v) => Some(*v),
            ExpectedWait::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, ExpectedWait::Unbounded)
    }
}

/// Expected number of trials until the first success (geometric mean `1/p`).
pub fn expected_trials(per_trial: Probability) -> ExpectedWait {
    if per_trial.is_zero() {
        return ExpectedWait::Unbounded;
    }
    ExpectedWait::from_value(1.0 / per_trial.value())
}

/// Expected time units until the first success, given how many trials run
/// per unit of time (e.g. 144 blocks per day gives days).
pub fn expected_time_to_first_success(per_trial: Probability, trials_per_unit: f64) -> ExpectedWait {
    expected_trials(per_trial).per(trials_per_unit)
}

/// Expected days until a block is found, converted to years.
pub fn expected_years(per_block: Probability, blocks_per_day: f64) -> ExpectedWait {
    expected_time_to_first_success(per_block, blocks_per_day).per(DAYS_PER_YEAR)
}
