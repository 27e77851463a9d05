//! Simulated sensor drift for bin telemetry.
//!
//! Each tick nudges every bin's fill level upward on average and its gas
//! reading in either direction, clamping to the sensor ranges and keeping
//! priority in step with the new fill level.

use std::collections::BTreeMap;

use rand::Rng;

use crate::models::Bin;

/// Maximum fill change per tick, in percentage points.
pub const FILL_DRIFT: f64 = 5.0;

/// Bias of the fill drift; 0.3 makes bins fill up 70% of the time.
pub const FILL_BIAS: f64 = 0.3;

/// Maximum gas reading change per tick.
pub const GAS_DRIFT: f64 = 50.0;

/// Applies one drift step to a single bin.
///
/// `fill += (u − 0.3) × 5` and `gas += (v − 0.5) × 50` for uniform `u, v`.
pub fn drift<R: Rng>(bin: &mut Bin, rng: &mut R) {
    let u: f64 = rng.random();
    let v: f64 = rng.random();
    bin.set_fill_level(bin.fill_level() + (u - FILL_BIAS) * FILL_DRIFT);
    bin.set_gas_level(bin.gas_level() + (v - 0.5) * GAS_DRIFT);
}

/// Applies one drift step to every bin, in key order.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use rand::{rngs::StdRng, SeedableRng};
/// use u_wasteroute::models::{Bin, GeoPoint, Priority};
/// use u_wasteroute::telemetry::simulate_tick;
///
/// let mut bins = BTreeMap::new();
/// bins.insert("A".to_string(), Bin::new(GeoPoint::new(0.0, 0.0), 89.0, 100.0));
///
/// let mut rng = StdRng::seed_from_u64(3);
/// for _ in 0..50 {
///     simulate_tick(&mut bins, &mut rng);
/// }
/// let bin = &bins["A"];
/// assert_eq!(bin.priority(), Priority::from_fill_level(bin.fill_level()));
/// ```
pub fn simulate_tick<R: Rng>(bins: &mut BTreeMap<String, Bin>, rng: &mut R) {
    for bin in bins.values_mut() {
        drift(bin, rng);
    }
    log::debug!("telemetry: drifted {} bins", bins.len());
}
