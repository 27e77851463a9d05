//! Presentation metrics derived from a route plan.
//!
//! Linear estimates over distance and stop count for a standard collection
//! truck: 40 km/h average speed, 15 minutes per stop, 8.5 km per liter,
//! 1.5 per liter fuel price, 2.3 kg CO₂ per km.

use serde::{Deserialize, Serialize};

use crate::models::RoutePlan;

/// Average driving speed in km/h.
pub const AVERAGE_SPEED_KMH: f64 = 40.0;

/// Service time per collected bin in minutes.
pub const MINUTES_PER_STOP: f64 = 15.0;

/// Fuel economy in km per liter.
pub const KM_PER_LITER: f64 = 8.5;

/// Fuel price per liter.
pub const FUEL_PRICE_PER_LITER: f64 = 1.5;

/// Emissions in kg CO₂ per km.
pub const CO2_KG_PER_KM: f64 = 2.3;

/// Efficiency score floor and ceiling.
const BASE_EFFICIENCY: f64 = 70.0;
const MAX_EFFICIENCY: f64 = 95.0;

/// Summary metrics for a planned route.
///
/// # Examples
///
/// ```
/// use u_wasteroute::models::RoutePlan;
/// use u_wasteroute::stats::RouteStats;
///
/// let plan = RoutePlan::new(vec!["A".into(), "B".into()], 20.0, None);
/// let stats = RouteStats::from_plan(&plan);
/// assert_eq!(stats.estimated_time_min, 60);
/// assert!((stats.co2_kg - 46.0).abs() < 1e-10);
/// assert_eq!(stats.efficiency, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStats {
    /// Number of bins on the route.
    pub bins_collected: usize,
    /// Round-trip distance in km, 0 for an unbounded plan.
    pub distance_km: f64,
    /// Driving plus service time, rounded to whole minutes.
    pub estimated_time_min: u64,
    /// Fuel used in liters.
    pub fuel_liters: f64,
    /// Fuel cost.
    pub fuel_cost: f64,
    /// CO₂ emitted in kg.
    pub co2_kg: f64,
    /// `min(95, 70 + fitness / 1000)` for plans with a fitness.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub efficiency: Option<f64>,
}

impl RouteStats {
    /// Derives the metrics for `plan`.
    ///
    /// An unbounded distance contributes nothing to distance-based metrics.
    pub fn from_plan(plan: &RoutePlan) -> Self {
        let distance = if plan.distance.is_finite() { plan.distance } else { 0.0 };
        let stops = plan.len() as f64;
        let minutes = distance / AVERAGE_SPEED_KMH * 60.0 + stops * MINUTES_PER_STOP;
        let fuel = distance / KM_PER_LITER;

        let efficiency = plan
            .fitness
            .filter(|f| f.is_finite())
            .map(|f| (BASE_EFFICIENCY + f / 1000.0).min(MAX_EFFICIENCY));

        Self {
            bins_collected: plan.len(),
            distance_km: distance,
            estimated_time_min: minutes.round() as u64,
            fuel_liters: fuel,
            fuel_cost: fuel * FUEL_PRICE_PER_LITER,
            co2_kg: distance * CO2_KG_PER_KM,
            efficiency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_formulas() {
        let plan = RoutePlan::new(vec!["A".into(), "B".into(), "C".into()], 17.0, None);
        let s = RouteStats::from_plan(&plan);
        assert_eq!(s.bins_collected, 3);
        assert!((s.fuel_liters - 2.0).abs() < 1e-10);
        assert!((s.fuel_cost - 3.0).abs() < 1e-10);
        assert!((s.co2_kg - 39.1).abs() < 1e-10);

        let plan = RoutePlan::new(vec!["A".into(), "B".into(), "C".into()], 40.0, None);
        assert_eq!(RouteStats::from_plan(&plan).estimated_time_min, 105);
    }

    #[test]
    fn test_efficiency_capped() {
        let plan = RoutePlan::new(vec!["A".into()], 5.0, Some(500.0));
        assert_eq!(RouteStats::from_plan(&plan).efficiency, Some(70.5));

        let plan = RoutePlan::new(vec!["A".into()], 5.0, Some(90_000.0));
        assert_eq!(RouteStats::from_plan(&plan).efficiency, Some(95.0));
    }

    #[test]
    fn test_unbounded_plan() {
        let s = RouteStats::from_plan(&RoutePlan::empty_scored());
        assert_eq!(s.bins_collected, 0);
        assert_eq!(s.distance_km, 0.0);
        assert_eq!(s.estimated_time_min, 0);
        assert_eq!(s.co2_kg, 0.0);
        assert_eq!(s.efficiency, None);
    }

    #[test]
    fn test_serialize_omits_missing_efficiency() {
        let s = RouteStats::from_plan(&RoutePlan::new(vec!["A".into()], 4.0, None));
        let json = serde_json::to_value(&s).unwrap();
        assert!(json.get("efficiency").is_none());
        assert_eq!(json["bins_collected"], 1);
    }
}
