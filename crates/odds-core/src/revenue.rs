//! Energy cost and expected solo-mining revenue.

use serde::{Deserialize, Serialize};

use crate::hashrate::Hashrate;
use crate::network::{NetworkParams, DAYS_PER_MONTH, DAYS_PER_YEAR, SATS_PER_BTC};
use crate::probability::HashrateShare;
use crate::share::{DeviceKind, DeviceSnapshot};

/// User settings for cost analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergySettings {
    /// Price per kWh.
    pub energy_rate: f64,
    /// Currency code the rate and BTC price are quoted in.
    pub energy_currency: String,
    /// Include revenue, profit and efficiency figures.
    pub show_revenue: bool,
    /// Hardware cost used for the payback estimate.
    pub device_cost: f64,
}

impl Default for EnergySettings {
    fn default() -> Self {
        EnergySettings {
            energy_rate: 0.12,
            energy_currency: "USD".to_string(),
            show_revenue: false,
            device_cost: 0.0,
        }
    }
}

/// A figure over the three reporting periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Periodic {
    pub daily: f64,
    pub monthly: f64,
    pub yearly: f64,
}

impl Periodic {
    pub fn from_daily(daily: f64) -> Self {
        Periodic {
            daily,
            monthly: daily * DAYS_PER_MONTH,
            yearly: daily * DAYS_PER_YEAR,
        }
    }

    fn minus(&self, other: &Periodic) -> Periodic {
        Periodic {
            daily: self.daily - other.daily,
            monthly: self.monthly - other.monthly,
            yearly: self.yearly - other.yearly,
        }
    }
}

/// Expected revenue and the resulting profitability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueAnalysis {
    pub btc: Periodic,
    pub revenue: Periodic,
    pub profit: Periodic,
    pub is_profitable: bool,
    /// BTC price at which revenue covers energy cost.
    pub break_even_btc_price: Option<f64>,
    pub cost_per_ghs_per_day: f64,
    pub sats_per_kwh: f64,
    pub btc_per_kwh: f64,
    /// Years to pay back the device cost from daily profit.
    pub roi_years: Option<f64>,
}

/// Energy consumption, cost and, when enabled, revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostAnalysis {
    pub power_watts: f64,
    pub kwh: Periodic,
    pub cost: Periodic,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<RevenueAnalysis>,
}

/// Expected BTC per day from solo mining at `hashrate`.
pub fn expected_btc_per_day(hashrate: Hashrate, network: &NetworkParams) -> f64 {
    let share = HashrateShare::of(hashrate, network.hashrate());
    share.value() * network.blocks_per_day * network.block_reward_btc
}

impl CostAnalysis {
    pub fn compute(
        power_watts: f64,
        hashrate: Hashrate,
        settings: &EnergySettings,
        network: &NetworkParams,
    ) -> Self {
        let power_watts = power_watts.max(0.0);
        let kwh = Periodic::from_daily(power_watts / 1000.0 * 24.0);
        let cost = Periodic::from_daily(kwh.daily * settings.energy_rate);

        let revenue = (settings.show_revenue && network.hashrate_ehs > 0.0).then(|| {
            let btc = Periodic::from_daily(expected_btc_per_day(hashrate, network));
            let revenue = Periodic::from_daily(btc.daily * network.btc_price);
            let profit = revenue.minus(&cost);
            let ghs = hashrate.as_ghs();
            let btc_per_kwh = if kwh.daily > 0.0 { btc.daily / kwh.daily } else { 0.0 };

            RevenueAnalysis {
                btc,
                revenue,
                profit,
                is_profitable: revenue.daily > cost.daily,
                break_even_btc_price: (btc.daily > 0.0).then(|| cost.daily / btc.daily),
                cost_per_ghs_per_day: if ghs > 0.0 { cost.daily / ghs } else { 0.0 },
                sats_per_kwh: btc_per_kwh * SATS_PER_BTC,
                btc_per_kwh,
                roi_years: (settings.device_cost > 0.0 && profit.daily > 0.0)
                    .then(|| settings.device_cost / profit.yearly),
            }
        });

        CostAnalysis {
            power_watts,
            kwh,
            cost,
            currency: settings.energy_currency.clone(),
            revenue,
        }
    }
}

/// Power draw and efficiency of one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceEfficiency {
    pub device_name: String,
    pub device_kind: DeviceKind,
    pub power_watts: f64,
    pub hashrate_ghs: f64,
    /// Zero when the device reports no hashrate.
    pub efficiency_w_per_gh: f64,
    pub efficiency_j_per_th: f64,
}

impl DeviceEfficiency {
    /// Missing or negative readings count as zero.
    pub fn compute(name: &str, kind: DeviceKind, power_watts: f64, hashrate_ghs: f64) -> Self {
        let power_watts = non_negative(power_watts);
        let hashrate_ghs = non_negative(hashrate_ghs);
        let w_per_gh = if hashrate_ghs > 0.0 {
            power_watts / hashrate_ghs
        } else {
            0.0
        };

        DeviceEfficiency {
            device_name: name.to_string(),
            device_kind: kind,
            power_watts,
            hashrate_ghs,
            efficiency_w_per_gh: w_per_gh,
            // W per GH/s is J per GH; a TH is a thousand of them
            efficiency_j_per_th: w_per_gh * 1000.0,
        }
    }
}

impl From<&DeviceSnapshot> for DeviceEfficiency {
    fn from(snapshot: &DeviceSnapshot) -> Self {
        DeviceEfficiency::compute(
            &snapshot.device_name,
            snapshot.device_kind,
            snapshot.power_watts,
            snapshot.hashrate_ghs,
        )
    }
}

/// Combined power draw, the input to [`CostAnalysis::compute`].
pub fn total_power_watts(devices: &[DeviceEfficiency]) -> f64 {
    devices.iter().map(|d| d.power_watts).sum()
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_energy_periods() {
        let settings = EnergySettings::default();
        let analysis = CostAnalysis::compute(
            15.0,
            Hashrate::from_ghs(1_000.0),
            &settings,
            &NetworkParams::default(),
        );
        // 15 W for a day is 0.36 kWh
        assert!(close(analysis.kwh.daily, 0.36));
        assert!(close(analysis.kwh.monthly, 10.8));
        assert!(close(analysis.kwh.yearly, 131.4));
        assert!(close(analysis.cost.daily, 0.0432));
        assert_eq!(analysis.currency, "USD");
        assert!(analysis.revenue.is_none());
    }

    #[test]
    fn test_expected_btc_per_day() {
        let btc = expected_btc_per_day(Hashrate::from_ghs(1_000.0), &NetworkParams::default());
        let expected = 1_000.0 / 650e9 * 144.0 * 3.125;
        assert!(close(btc, expected));
    }

    #[test]
    fn test_revenue_when_enabled() {
        let settings = EnergySettings {
            show_revenue: true,
            device_cost: 200.0,
            ..EnergySettings::default()
        };
        let network = NetworkParams {
            btc_price: 50_000.0,
            ..NetworkParams::default()
        };
        let analysis = CostAnalysis::compute(15.0, Hashrate::from_ghs(1_000.0), &settings, &network);
        let revenue = analysis.revenue.unwrap();

        // About 0.0346 a day against 0.0432 of energy
        let daily_btc = 1_000.0 / 650e9 * 144.0 * 3.125;
        assert!(close(revenue.btc.daily, daily_btc));
        assert!(close(revenue.revenue.daily, daily_btc * 50_000.0));
        assert!(revenue.profit.daily < 0.0);
        assert!(!revenue.is_profitable);
        assert!(revenue.roi_years.is_none());

        let break_even = revenue.break_even_btc_price.unwrap();
        assert!(close(break_even, 0.0432 / daily_btc));
        assert!(close(revenue.cost_per_ghs_per_day, 0.0432 / 1_000.0));
        assert!(close(revenue.sats_per_kwh, daily_btc * 1e8 / 0.36));
        assert!(close(revenue.btc_per_kwh, daily_btc / 0.36));
    }

    #[test]
    fn test_revenue_above_break_even_is_profitable() {
        let settings = EnergySettings {
            show_revenue: true,
            device_cost: 200.0,
            ..EnergySettings::default()
        };
        let network = NetworkParams {
            btc_price: 100_000.0,
            ..NetworkParams::default()
        };
        let revenue = CostAnalysis::compute(15.0, Hashrate::from_ghs(1_000.0), &settings, &network)
            .revenue
            .unwrap();
        assert!(revenue.is_profitable);
        assert!(revenue.profit.daily > 0.0);
        assert!(close(revenue.roi_years.unwrap(), 200.0 / revenue.profit.yearly));
    }

    #[test]
    fn test_device_efficiency() {
        let device = DeviceEfficiency::compute("bitaxe-1", DeviceKind::Bitaxe, 15.0, 1_200.0);
        assert!(close(device.efficiency_w_per_gh, 0.0125));
        assert!(close(device.efficiency_j_per_th, 12.5));
        assert_eq!(device.device_kind, DeviceKind::Bitaxe);

        let idle = DeviceEfficiency::compute("avalon-1", DeviceKind::Avalon, 90.0, 0.0);
        assert_eq!(idle.efficiency_w_per_gh, 0.0);
        assert_eq!(idle.efficiency_j_per_th, 0.0);

        let missing = DeviceEfficiency::compute("avalon-2", DeviceKind::Avalon, f64::NAN, 500.0);
        assert_eq!(missing.power_watts, 0.0);
        assert_eq!(missing.efficiency_j_per_th, 0.0);
    }

    #[test]
    fn test_total_power() {
        let devices = [
            DeviceEfficiency::compute("bitaxe-1", DeviceKind::Bitaxe, 15.0, 1_200.0),
            DeviceEfficiency::compute("avalon-1", DeviceKind::Avalon, 90.0, 0.0),
        ];
        assert!(close(total_power_watts(&devices), 105.0));
    }

    #[test]
    fn test_profitable_roi() {
        let settings = EnergySettings {
            energy_rate: 0.0,
            show_revenue: true,
            device_cost: 365.0,
            ..EnergySettings::default()
        };
        // A tenth of the network at a price that yields 1 unit of profit a day
        let network = NetworkParams::default();
        let hashrate = Hashrate::from_ehs(network.hashrate_ehs / 10.0);
        let daily_btc = expected_btc_per_day(hashrate, &network);
        let network = NetworkParams {
            btc_price: 1.0 / daily_btc,
            ..network
        };

        let revenue = CostAnalysis::compute(1.0, hashrate, &settings, &network)
            .revenue
            .unwrap();
        assert!(revenue.is_profitable);
        assert!(close(revenue.roi_years.unwrap(), 1.0));
    }

    #[test]
    fn test_no_revenue_without_network_hashrate() {
        let settings = EnergySettings {
            show_revenue: true,
            ..EnergySettings::default()
        };
        let network = NetworkParams::with_hashrate_ehs(0.0);
        let analysis = CostAnalysis::compute(10.0, Hashrate::from_ghs(1.0), &settings, &network);
        assert!(analysis.revenue.is_none());
    }

    #[test]
    fn test_zero_hashrate_has_no_break_even() {
        let settings = EnergySettings {
            show_revenue: true,
            ..EnergySettings::default()
        };
        let analysis =
            CostAnalysis::compute(10.0, Hashrate::ZERO, &settings, &NetworkParams::default());
        let revenue = analysis.revenue.unwrap();
        assert!(revenue.break_even_btc_price.is_none());
        assert_eq!(revenue.cost_per_ghs_per_day, 0.0);
    }
}
