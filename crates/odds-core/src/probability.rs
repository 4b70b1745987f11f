//! Probability of finding at least one block.
//!
//! Solo mining is a sequence of independent block searches. If a miner's
//! chance of winning a single block is `p`, the chance of winning at least
//! one of `n` blocks is `1 - (1 - p)^n`.
//!
//! For realistic hashrate shares `p` is far below `f64::EPSILON` relative to
//! one, so `1 - p` rounds before the power is taken. The engine instead
//! evaluates `-expm1(n * ln1p(-p))`, which stays accurate down to the
//! smallest shares.

use serde::{Deserialize, Serialize};

use crate::hashrate::Hashrate;

/// A probability, always inside `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Probability(f64);

impl Probability {
    pub const ZERO: Probability = Probability(0.0);
    pub const ONE: Probability = Probability(1.0);

    /// Create a probability, clamping to `[0, 1]`. NaN becomes zero.
    ///
    /// Display calculations prefer a degenerate value over a failure, so
    /// out-of-range inputs are clamped rather than rejected.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Probability::ZERO;
        }
        Probability(value.clamp(0.0, 1.0))
    }

    /// The raw value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    pub fn is_certain(&self) -> bool {
        self.0 >= 1.0
    }

    /// The value as a percentage.
    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }
}

impl From<f64> for Probability {
    fn from(value: f64) -> Self {
        Probability::new(value)
    }
}

/// Fraction of the network hashrate contributed by a miner.
///
/// Never negative. Values above one are kept as-is; they only appear in
/// degenerate inputs and convert to a certain per-block probability.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashrateShare(f64);

impl HashrateShare {
    /// Create a share. Negative and NaN values become zero.
    pub fn new(share: f64) -> Self {
        if share.is_nan() || share < 0.0 {
            return HashrateShare(0.0);
        }
        HashrateShare(share)
    }

    /// Share of `network` contributed by `miner`. A network hashrate that is
    /// not positive yields a zero share.
    pub fn of(miner: Hashrate, network: Hashrate) -> Self {
        if !network.is_positive() {
            return HashrateShare(0.0);
        }
        HashrateShare::new(miner.as_hs() / network.as_hs())
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Chance of winning a single block.
    pub fn per_block(&self) -> Probability {
        Probability::new(self.0)
    }
}

/// Probability of at least one success in `trials` independent attempts.
///
/// Edge cases resolve exactly: zero trials or a zero per-trial probability
/// give `0`; a certain per-trial probability with any positive trial count
/// gives `1`. Negative and NaN trial counts count as zero.
pub fn probability_at_least_one(per_trial: Probability, trials: f64) -> Probability {
    if trials.is_nan() || trials <= 0.0 || per_trial.is_zero() {
        return Probability::ZERO;
    }
    if per_trial.is_certain() || trials.is_infinite() {
        return Probability::ONE;
    }

    // (1 - p)^n == exp(n * ln(1 - p)); 1 - exp(x) == -expm1(x)
    let log_miss = trials * (-per_trial.value()).ln_1p();
    Probability::new(-log_miss.exp_m1())
}

/// Probability that a Poisson process with `rate_per_sec` fires at least once
/// within `seconds`.
///
/// This is the continuous-time counterpart of
/// [`probability_at_least_one`], used when the per-trial probability is
/// tiny and trials are counted as hashes.
pub fn probability_within(rate_per_sec: f64, seconds: f64) -> Probability {
    if !(rate_per_sec > 0.0) || !(seconds > 0.0) {
        return Probability::ZERO;
    }
    Probability::new(-(-rate_per_sec * seconds).exp_m1())
}

/// Probability of finding at least one block over a number of days.
pub fn probability_over_days(share: HashrateShare, days: f64, blocks_per_day: f64) -> Probability {
    probability_at_least_one(share.per_block(), days * blocks_per_day)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `1 - (1 - p)^n` for p = 1e-15, n = 1e6 by binomial expansion:
    /// n*p - n*(n-1)/2 * p^2. Later terms are below f64 resolution.
    const STABILITY_REFERENCE: f64 = 9.999_999_995e-10;

    #[test]
    fn test_zero_probability_is_zero() {
        for trials in [0.0, 1.0, 144.0, 1e6, 1e12] {
            assert_eq!(probability_at_least_one(Probability::ZERO, trials), Probability::ZERO);
        }
    }

    #[test]
    fn test_certain_probability_is_one() {
        for trials in [1.0, 2.0, 144.0, 1e9] {
            assert_eq!(probability_at_least_one(Probability::ONE, trials), Probability::ONE);
        }
    }

    #[test]
    fn test_zero_trials_is_zero() {
        for p in [0.0, 1e-12, 0.5, 1.0] {
            assert_eq!(probability_at_least_one(Probability::new(p), 0.0), Probability::ZERO);
        }
    }

    #[test]
    fn test_invalid_inputs_are_clamped() {
        assert_eq!(Probability::new(-0.5), Probability::ZERO);
        assert_eq!(Probability::new(7.0), Probability::ONE);
        assert_eq!(Probability::new(f64::NAN), Probability::ZERO);
        assert_eq!(probability_at_least_one(Probability::new(0.5), -3.0), Probability::ZERO);
        assert_eq!(probability_at_least_one(Probability::new(0.5), f64::NAN), Probability::ZERO);
        assert_eq!(HashrateShare::new(-1.0).value(), 0.0);
    }

    #[test]
    fn test_monotonic_in_trials() {
        for p in [1e-15, 1e-10, 1e-4, 0.3] {
            let per_trial = Probability::new(p);
            let mut previous = Probability::ZERO;
            let mut trials = 1.0;
            while trials < 1e15 {
                let current = probability_at_least_one(per_trial, trials);
                assert!(current >= previous, "p={} trials={}", p, trials);
                previous = current;
                trials *= 3.7;
            }
        }
    }

    #[test]
    fn test_small_probability_stability() {
        let result = probability_at_least_one(Probability::new(1e-15), 1e6).value();
        assert!(result > 0.0 && result < 1.0);

        let rel_err = (result - STABILITY_REFERENCE).abs() / STABILITY_REFERENCE;
        assert!(rel_err < 1e-6, "relative error {}", rel_err);

        // The naive form loses the digits this guards against.
        let naive = 1.0 - (1.0 - 1e-15f64).powf(1e6);
        let naive_err = (naive - STABILITY_REFERENCE).abs() / STABILITY_REFERENCE;
        assert!(naive_err > 1e-5);
    }

    #[test]
    fn test_hundred_ghs_against_network() {
        let share = HashrateShare::of(Hashrate::from_ghs(100.0), Hashrate::from_ehs(650.0));
        let per_block = share.per_block().value();
        assert!((per_block - 1.538_461_5e-10).abs() < 1e-16);

        let per_day = probability_over_days(share, 1.0, 144.0).value();
        let expected = 144.0 * per_block;
        assert!((per_day - expected).abs() / expected < 1e-6);
        assert!((per_day - 2.2154e-8).abs() < 1e-11);
    }

    #[test]
    fn test_moderate_values_match_direct_formula() {
        let p = 0.01;
        let direct = 1.0 - (1.0f64 - p).powi(10);
        let engine = probability_at_least_one(Probability::new(p), 10.0).value();
        assert!((direct - engine).abs() < 1e-12);
    }

    #[test]
    fn test_share_above_one_is_certain() {
        let share = HashrateShare::of(Hashrate::from_ehs(700.0), Hashrate::from_ehs(650.0));
        assert!(share.value() > 1.0);
        assert!(share.per_block().is_certain());
    }

    #[test]
    fn test_share_of_empty_network() {
        let share = HashrateShare::of(Hashrate::from_ghs(1.0), Hashrate::ZERO);
        assert_eq!(share.value(), 0.0);
    }

    #[test]
    fn test_probability_within() {
        assert_eq!(probability_within(0.0, 3600.0), Probability::ZERO);
        assert_eq!(probability_within(1.0, 0.0), Probability::ZERO);
        assert_eq!(probability_within(f64::NAN, 10.0), Probability::ZERO);

        // Expected one event per hour: P(within an hour) = 1 - 1/e
        let p = probability_within(1.0 / 3600.0, 3600.0).value();
        assert!((p - (1.0 - (-1.0f64).exp())).abs() < 1e-12);
    }
}
