//! Difficulty conversions: hashes per share and implied network hashrate.

/// Hashes per unit of difficulty (2^32).
pub const TWO_POW_32: f64 = 4_294_967_296.0;

/// Average hashes needed to find a share at the given difficulty.
pub fn expected_hashes(difficulty: f64) -> f64 {
    difficulty * TWO_POW_32
}

/// Network hashrate in H/s implied by a difficulty and block interval.
///
/// At difficulty D a block takes D * 2^32 hashes on average, and one block
/// is found every interval. Returns `0.0` for a non-positive interval.
pub fn difficulty_to_hashrate(difficulty: f64, block_interval_secs: f64) -> f64 {
    if block_interval_secs <= 0.0 {
        return 0.0;
    }
    expected_hashes(difficulty) / block_interval_secs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_hashes() {
        assert_eq!(expected_hashes(1.0), TWO_POW_32);
        assert_eq!(expected_hashes(0.0), 0.0);
    }

    #[test]
    fn test_difficulty_to_hashrate() {
        let hs = difficulty_to_hashrate(1.0, 600.0);
        assert!((hs - TWO_POW_32 / 600.0).abs() < 1e-6);
        assert_eq!(difficulty_to_hashrate(1.0, 0.0), 0.0);
    }

    #[test]
    fn test_current_difficulty_magnitude() {
        // 95T difficulty at ten-minute blocks is roughly 680 EH/s
        let ehs = difficulty_to_hashrate(95e12, 600.0) / 1e18;
        assert!(ehs > 670.0 && ehs < 690.0, "hashrate {}", ehs);
    }
}
