//! The static description of one charging station.

use ev_core::{ChargerId, GeoPoint};

/// A charging station as loaded from the scenario: identity, location, and
/// capacity limits.
///
/// `ChargerSpec` is immutable for the lifetime of the scheduler built from
/// it; all mutable charging state lives in the scheduler.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargerSpec {
    /// Identity of this charger.
    pub id: ChargerId,

    /// Where the charger sits in the scenario.
    pub location: GeoPoint,

    /// Maximum number of simultaneously plugged vehicles.  At least 1.
    pub plug_count: usize,

    /// Maximum queue length.  `None` means unbounded (the default).
    pub queue_capacity: Option<usize>,

    /// Rated output power per plug, in watts.  Strategies cap this at the
    /// vehicle's own charging-power limit.
    pub rated_power_w: f64,
}

impl ChargerSpec {
    /// Create a spec with an unbounded queue.
    pub fn new(id: ChargerId, location: GeoPoint, plug_count: usize, rated_power_w: f64) -> Self {
        Self {
            id,
            location,
            plug_count,
            queue_capacity: None,
            rated_power_w,
        }
    }

    /// Bound the waiting queue to at most `capacity` vehicles.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }
}
