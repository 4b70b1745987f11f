//! Human-readable rendering of counts, probabilities, durations and rates.
//!
//! Every view formats through this module so thresholds and rounding stay
//! identical across the dashboard. Sentinels, by category:
//!
//! | input                                   | output     |
//! |-----------------------------------------|------------|
//! | absent (NaN, negative, infinite, null)  | `"N/A"`    |
//! | zero count                              | `"0"`      |
//! | zero probability                        | `"0%"`     |
//! | unbounded expected wait                 | `"Never"`  |

use crate::expected::ExpectedWait;
use crate::hashrate::Hashrate;
use crate::network::DAYS_PER_YEAR;

/// Rendered for values that are missing or not meaningful.
pub const NOT_AVAILABLE: &str = "N/A";

/// Rendered for an expected wait with no finite mean.
pub const NEVER: &str = "Never";

/// Probabilities strictly below this render as "1 in N".
pub const ONE_IN_N_THRESHOLD: f64 = 1e-6;

/// Probabilities at or above this render with four decimal places of
/// percentage, below it with six.
pub const PERCENT_FOUR_DECIMALS_THRESHOLD: f64 = 1e-4;

const COUNT_UNITS: [(f64, &str); 5] = [
    (1e3, "K"),
    (1e6, "M"),
    (1e9, "G"),
    (1e12, "T"),
    (1e15, "P"),
];

const WORD_UNITS: [(f64, &str); 5] = [
    (1e3, "thousand"),
    (1e6, "million"),
    (1e9, "billion"),
    (1e12, "trillion"),
    (1e15, "quadrillion"),
];

const HASHRATE_UNITS: [(f64, &str); 6] = [
    (1e18, "EH/s"),
    (1e15, "PH/s"),
    (1e12, "TH/s"),
    (1e9, "GH/s"),
    (1e6, "MH/s"),
    (1e3, "KH/s"),
];

/// A value worth formatting: finite and not negative.
fn present(value: f64) -> Option<f64> {
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Group an integer's digits in thousands: `1234567` -> `"1,234,567"`.
pub fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Drop trailing zeros (and a trailing dot) from a fixed-point rendering.
fn trim_decimals(mut s: String) -> String {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}

/// Round to `decimals` places the way `{:.N}` renders it.
fn round_to(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Pick the unit from an ascending table for `value`, returning the
/// mantissa. `None` when the value rounds below 1000.
///
/// A mantissa that rounds up to 1000 moves to the next unit, so `999_999`
/// scales to `1.00` million rather than `1000.00` thousand.
fn scale_by<'a>(value: f64, units: &[(f64, &'a str)], decimals: usize) -> Option<(f64, &'a str)> {
    if value.round() < 1000.0 {
        return None;
    }
    let last = units.len().checked_sub(1)?;
    units.iter().enumerate().find_map(|(i, (unit, suffix))| {
        let mantissa = value / unit;
        (round_to(mantissa, decimals) < 1000.0 || i == last).then_some((mantissa, *suffix))
    })
}

/// Scale by powers of 1000 up to P with the given decimals. Below 1000 the
/// value is rounded and digit-grouped.
fn scaled_count(value: f64, decimals: usize) -> String {
    match scale_by(value, &COUNT_UNITS, decimals) {
        Some((mantissa, suffix)) => format!("{:.*}{}", decimals, mantissa, suffix),
        None => group_digits(value.round() as u64),
    }
}

/// Format a count or difficulty with K/M/G/T/P suffixes (`"1.23T"`).
pub fn format_count(value: f64) -> String {
    match present(value) {
        Some(v) if v == 0.0 => "0".to_string(),
        Some(v) => scaled_count(v, 2),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Format a share or network difficulty.
pub fn format_difficulty(difficulty: f64) -> String {
    format_count(difficulty)
}

/// Format a large integer with words: `6.5e9` -> `"6.5 billion"`.
pub fn format_large_number(value: f64) -> String {
    let Some(v) = present(value) else {
        return NOT_AVAILABLE.to_string();
    };
    match scale_by(v, &WORD_UNITS, 2) {
        Some((mantissa, word)) => format!("{} {}", trim_decimals(format!("{:.2}", mantissa)), word),
        None => group_digits(v.round() as u64),
    }
}

/// Format a probability.
///
/// Values below one in a million are unreadable as percentages and render
/// as odds instead (`"1 in 6.5 billion"`). Exactly `1e-6` stays a
/// percentage.
pub fn format_probability(probability: f64) -> String {
    let Some(p) = present(probability) else {
        return NOT_AVAILABLE.to_string();
    };
    let p = p.min(1.0);
    if p == 0.0 {
        return "0%".to_string();
    }
    if p < ONE_IN_N_THRESHOLD {
        return format!("1 in {}", format_large_number((1.0 / p).round()));
    }
    if p >= PERCENT_FOUR_DECIMALS_THRESHOLD {
        format!("{:.4}%", p * 100.0)
    } else {
        format!("{:.6}%", p * 100.0)
    }
}

/// Format an expected wait given in years.
///
/// At least one year renders in years (suffix-scaled past a thousand),
/// otherwise days, otherwise hours. There is no sub-hour resolution.
pub fn format_expected_years(years: ExpectedWait) -> String {
    let y = match years {
        ExpectedWait::Unbounded => return NEVER.to_string(),
        ExpectedWait::Finite(y) => match present(y) {
            Some(y) => y,
            None => return NOT_AVAILABLE.to_string(),
        },
    };
    if round_to(y, 1) >= 1000.0 {
        return format!("{} years", scaled_count(y, 1));
    }
    if y >= 1.0 {
        return format!("{:.1} years", y);
    }
    let days = y * DAYS_PER_YEAR;
    if days >= 1.0 {
        format!("{:.1} days", days)
    } else {
        format!("{:.1} hours", days * 24.0)
    }
}

/// Format a duration given in hours on a minutes-to-years ladder.
pub fn format_time_duration(hours: ExpectedWait) -> String {
    let h = match hours {
        ExpectedWait::Unbounded => return NEVER.to_string(),
        ExpectedWait::Finite(h) => match present(h) {
            Some(h) => h,
            None => return NOT_AVAILABLE.to_string(),
        },
    };
    if h < 1.0 {
        format!("{} minutes", (h * 60.0) as u64)
    } else if h < 24.0 {
        format!("{:.1} hours", h)
    } else if h < 168.0 {
        format!("{:.1} days", h / 24.0)
    } else if h < 720.0 {
        format!("{:.1} weeks", h / 168.0)
    } else if h < 8760.0 {
        format!("{:.1} months", h / 720.0)
    } else {
        format!("{:.1} years", h / 8760.0)
    }
}

/// Format a hashrate from H/s up to EH/s.
pub fn format_hashrate(hashrate: Hashrate) -> String {
    let Some(hs) = present(hashrate.as_hs()) else {
        return NOT_AVAILABLE.to_string();
    };
    match HASHRATE_UNITS.iter().find(|(unit, _)| hs >= *unit) {
        Some((unit, suffix)) => format!("{:.2} {}", hs / unit, suffix),
        None => format!("{:.2} H/s", hs),
    }
}

/// Format a BTC amount to the satoshi.
pub fn format_btc(btc: f64) -> String {
    if !btc.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{:.8} BTC", btc)
}
