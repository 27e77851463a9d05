//! Waste bin, location, and priority types.

use serde::{Deserialize, Serialize};

/// Upper bound of the simulated gas sensor range.
pub const GAS_LEVEL_CEILING: f64 = 1023.0;

/// A geographic coordinate in degrees.
///
/// # Examples
///
/// ```
/// use u_wasteroute::models::GeoPoint;
///
/// let depot = GeoPoint::new(37.765, -122.42);
/// assert_eq!(depot.lat(), 37.765);
/// assert!(GeoPoint::checked(91.0, 0.0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// Creates a point without validation; NaN coordinates propagate into distances.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Creates a point, returning `None` for non-finite or out-of-range coordinates.
    pub fn checked(lat: f64, lon: f64) -> Option<Self> {
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }
        Some(Self { lat, lon })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Great-circle distance to another point in kilometers.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        crate::distance::haversine(*self, *other)
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

impl From<GeoPoint> for (f64, f64) {
    fn from(p: GeoPoint) -> Self {
        (p.lat, p.lon)
    }
}

/// Urgency class of a bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Fill level below 50.
    Low,
    /// Fill level in `[50, 70)`.
    Medium,
    /// Fill level in `[70, 90)`.
    High,
    /// Fill level of 90 or more.
    Critical,
}

impl Priority {
    /// Derives the priority class from a fill level.
    ///
    /// ```
    /// use u_wasteroute::models::Priority;
    ///
    /// assert_eq!(Priority::from_fill_level(95.0), Priority::Critical);
    /// assert_eq!(Priority::from_fill_level(70.0), Priority::High);
    /// assert_eq!(Priority::from_fill_level(49.9), Priority::Low);
    /// ```
    pub fn from_fill_level(fill_level: f64) -> Self {
        if fill_level >= 90.0 {
            Priority::Critical
        } else if fill_level >= 70.0 {
            Priority::High
        } else if fill_level >= 50.0 {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    /// Score contribution in route fitness.
    pub fn fitness_weight(self) -> f64 {
        match self {
            Priority::Critical => 100.0,
            Priority::High => 75.0,
            Priority::Medium => 50.0,
            Priority::Low => 25.0,
        }
    }

    /// Multiplier in the ant-colony desirability heuristic.
    pub fn heuristic_multiplier(self) -> f64 {
        match self {
            Priority::Critical => 4.0,
            Priority::High => 3.0,
            Priority::Medium => 2.0,
            Priority::Low => 1.0,
        }
    }
}

/// A waste bin with sensor telemetry.
///
/// Priority is derived from the fill level unless supplied explicitly via
/// [`with_priority`](Bin::with_priority). Mutating the fill level through
/// [`set_fill_level`](Bin::set_fill_level) re-derives it.
///
/// # Examples
///
/// ```
/// use u_wasteroute::models::{Bin, GeoPoint, Priority};
///
/// let bin = Bin::new(GeoPoint::new(37.7749, -122.4194), 85.0, 450.0);
/// assert_eq!(bin.priority(), Priority::High);
///
/// let clamped = Bin::new(GeoPoint::new(0.0, 0.0), 140.0, -3.0);
/// assert_eq!(clamped.fill_level(), 100.0);
/// assert_eq!(clamped.gas_level(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BinRecord")]
pub struct Bin {
    location: GeoPoint,
    fill_level: f64,
    gas_level: f64,
    priority: Priority,
    capacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_collection: Option<String>,
}

impl Bin {
    /// Creates a bin with derived priority and a nominal capacity of 100.
    pub fn new(location: GeoPoint, fill_level: f64, gas_level: f64) -> Self {
        let fill_level = clamp_fill(fill_level);
        Self {
            location,
            fill_level,
            gas_level: gas_level.max(0.0),
            priority: Priority::from_fill_level(fill_level),
            capacity: 100.0,
            address: None,
            last_collection: None,
        }
    }

    /// Overrides the derived priority with an upstream value.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the nominal container volume.
    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the street address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Sets the last collection date.
    pub fn with_last_collection(mut self, date: impl Into<String>) -> Self {
        self.last_collection = Some(date.into());
        self
    }

    /// Bin location.
    pub fn location(&self) -> GeoPoint {
        self.location
    }

    /// Fill level in `[0, 100]`.
    pub fn fill_level(&self) -> f64 {
        self.fill_level
    }

    /// Gas reading, nonnegative.
    pub fn gas_level(&self) -> f64 {
        self.gas_level
    }

    /// Urgency class.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Nominal container volume (informational).
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Street address, if known.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Last collection date, if known.
    pub fn last_collection(&self) -> Option<&str> {
        self.last_collection.as_deref()
    }

    /// Updates the fill level (clamped to `[0, 100]`) and re-derives priority.
    pub fn set_fill_level(&mut self, fill_level: f64) {
        self.fill_level = clamp_fill(fill_level);
        self.priority = Priority::from_fill_level(self.fill_level);
    }

    /// Updates the gas reading, clamped to `[0, GAS_LEVEL_CEILING]`.
    pub fn set_gas_level(&mut self, gas_level: f64) {
        self.gas_level = gas_level.clamp(0.0, GAS_LEVEL_CEILING);
    }
}

fn clamp_fill(fill_level: f64) -> f64 {
    fill_level.clamp(0.0, 100.0)
}

/// Wire shape of a bin; `priority` is optional and derived when absent.
#[derive(Deserialize)]
struct BinRecord {
    location: GeoPoint,
    fill_level: f64,
    #[serde(default)]
    gas_level: f64,
    #[serde(default)]
    priority: Option<Priority>,
    #[serde(default = "default_bin_capacity")]
    capacity: f64,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    last_collection: Option<String>,
}

fn default_bin_capacity() -> f64 {
    100.0
}

impl From<BinRecord> for Bin {
    fn from(r: BinRecord) -> Self {
        let mut bin = Bin::new(r.location, r.fill_level, r.gas_level).with_capacity(r.capacity);
        if let Some(p) = r.priority {
            bin = bin.with_priority(p);
        }
        bin.address = r.address;
        bin.last_collection = r.last_collection;
        bin
    }
}
