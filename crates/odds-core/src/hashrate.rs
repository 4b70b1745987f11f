//! Hashrate values with explicit units.

use serde::{Deserialize, Serialize};

const GIGA: f64 = 1e9;
const TERA: f64 = 1e12;
const EXA: f64 = 1e18;

/// A hashrate in hashes per second.
///
/// Devices report GH/s or TH/s and the network is quoted in EH/s; keeping a
/// single base unit avoids mixing them up when computing a share.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hashrate(f64);

impl Hashrate {
    pub const ZERO: Hashrate = Hashrate(0.0);

    pub fn from_hs(hs: f64) -> Self {
        Hashrate(hs)
    }

    pub fn from_ghs(ghs: f64) -> Self {
        Hashrate(ghs * GIGA)
    }

    pub fn from_ths(ths: f64) -> Self {
        Hashrate(ths * TERA)
    }

    pub fn from_ehs(ehs: f64) -> Self {
        Hashrate(ehs * EXA)
    }

    pub fn as_hs(&self) -> f64 {
        self.0
    }

    pub fn as_ghs(&self) -> f64 {
        self.0 / GIGA
    }

    pub fn as_ths(&self) -> f64 {
        self.0 / TERA
    }

    pub fn as_ehs(&self) -> f64 {
        self.0 / EXA
    }

    /// True when the value is usable as a rate (finite and above zero).
    pub fn is_positive(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl core::ops::Add for Hashrate {
    type Output = Hashrate;

    fn add(self, rhs: Hashrate) -> Hashrate {
        Hashrate(self.0 + rhs.0)
    }
}

impl core::iter::Sum for Hashrate {
    fn sum<I: Iterator<Item = Hashrate>>(iter: I) -> Hashrate {
        iter.fold(Hashrate::ZERO, |acc, h| acc + h)
    }
}

impl core::fmt::Display for Hashrate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&crate::format::format_hashrate(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversions() {
        let h = Hashrate::from_ghs(100.0);
        assert_eq!(h.as_hs(), 100e9);
        assert_eq!(h.as_ths(), 0.1);
        assert_eq!(Hashrate::from_ehs(650.0).as_ghs(), 650e9);
    }

    #[test]
    fn test_sum_of_devices() {
        let total: Hashrate = [Hashrate::from_ghs(500.0), Hashrate::from_ths(1.0)]
            .into_iter()
            .sum();
        assert_eq!(total.as_ghs(), 1500.0);
    }

    #[test]
    fn test_is_positive() {
        assert!(Hashrate::from_ghs(1.0).is_positive());
        assert!(!Hashrate::ZERO.is_positive());
        assert!(!Hashrate::from_hs(f64::NAN).is_positive());
    }
}
